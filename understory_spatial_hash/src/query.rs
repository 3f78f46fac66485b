// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query results.

use alloc::vec::Vec;

use crate::hash::ShapeId;

/// Shapes found by a single-shape or region query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collisions {
    /// Matching shapes, in bucket scan order.
    pub hits: Vec<ShapeId>,
    /// Number of AABB overlap tests performed.
    pub tests: usize,
}

impl Collisions {
    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of matching shapes.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Unique overlapping pairs found by an all-pairs query.
///
/// Each pair is stored as `(lower id, higher id)` and appears once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollidingPairs {
    /// Overlapping pairs.
    pub pairs: Vec<(ShapeId, ShapeId)>,
    /// Number of AABB overlap tests performed.
    pub tests: usize,
}

impl CollidingPairs {
    /// Returns true if no pair overlaps.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of overlapping pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn push(&mut self, a: ShapeId, b: ShapeId) {
        if a < b {
            self.pairs.push((a, b));
        } else {
            self.pairs.push((b, a));
        }
    }
}
