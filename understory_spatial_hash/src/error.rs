// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for spatial hash operations.

use crate::hash::ShapeId;

/// Errors reported by [`SpatialHash`][crate::SpatialHash] operations.
///
/// Removing an untracked shape and updating a shape without changing its
/// cell are not errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// World extent or cell size is not strictly positive, or the resulting
    /// bucket grid cannot be allocated.
    #[error("invalid spatial hash configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: &'static str,
    },

    /// The shape reported an inverted or NaN bounding box.
    #[error("shape bounding box is malformed (min > max or NaN)")]
    InvalidShape,

    /// The shape's width or height exceeds the cell size.
    #[error("shape bounding box is larger than the grid cell size")]
    ShapeTooLarge,

    /// The handle does not refer to a shape tracked by this hash.
    #[error("shape {0:?} is not tracked by this spatial hash")]
    UnknownShape(ShapeId),
}
