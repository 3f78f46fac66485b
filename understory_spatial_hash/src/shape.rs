// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability a shape needs to be tracked by a spatial hash.

use crate::types::Aabb2D;

/// A shape that can report its world-space axis-aligned bounding box.
///
/// Implement this once per concrete shape kind. The hash only calls it on
/// [`insert`][crate::SpatialHash::insert] and
/// [`update`][crate::SpatialHash::update] and keeps a snapshot of the result,
/// so shapes can stay immutable or be owned elsewhere.
///
/// ```
/// use understory_spatial_hash::{Aabb2D, Bounded};
///
/// struct Circle {
///     x: f32,
///     y: f32,
///     r: f32,
/// }
///
/// impl Bounded<f32> for Circle {
///     fn aabb(&self) -> Aabb2D<f32> {
///         Aabb2D::new(self.x - self.r, self.y - self.r, self.x + self.r, self.y + self.r)
///     }
/// }
///
/// let c = Circle { x: 10.0, y: 10.0, r: 2.0 };
/// assert_eq!(c.aabb(), Aabb2D::new(8.0, 8.0, 12.0, 12.0));
/// ```
pub trait Bounded<T> {
    /// The bounding box as `(min_x, min_y, max_x, max_y)`.
    fn aabb(&self) -> Aabb2D<T>;
}

impl<T: Copy> Bounded<T> for Aabb2D<T> {
    #[inline]
    fn aabb(&self) -> Self {
        *self
    }
}

impl<T, S: Bounded<T> + ?Sized> Bounded<T> for &S {
    #[inline]
    fn aabb(&self) -> Aabb2D<T> {
        (**self).aabb()
    }
}
