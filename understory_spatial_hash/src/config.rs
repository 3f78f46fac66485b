// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for a [`SpatialHash`][crate::SpatialHash].

use core::cmp::Ordering;

use crate::error::Error;
use crate::grid::{GridScalar, cell_count};

/// World extent and cell size of a spatial hash.
///
/// The world covers `[0, width] × [0, height]`. `cell_size` must be at least
/// as large as the biggest shape that will be inserted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialHashConfig<T> {
    /// World width.
    pub width: T,
    /// World height.
    pub height: T,
    /// Edge length of a square grid cell.
    pub cell_size: T,
}

impl<T: GridScalar> SpatialHashConfig<T> {
    /// Create a configuration. Nothing is checked until [`validate`][Self::validate].
    pub const fn new(width: T, height: T, cell_size: T) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Check that all parameters are strictly positive.
    ///
    /// NaN parameters are rejected as well.
    pub fn validate(&self) -> Result<(), Error> {
        let zero = T::zero();
        if !is_positive(self.width, zero) {
            return Err(Error::InvalidConfiguration {
                reason: "world width must be positive",
            });
        }
        if !is_positive(self.height, zero) {
            return Err(Error::InvalidConfiguration {
                reason: "world height must be positive",
            });
        }
        if !is_positive(self.cell_size, zero) {
            return Err(Error::InvalidConfiguration {
                reason: "cell size must be positive",
            });
        }
        Ok(())
    }

    /// Number of columns and rows, after validating.
    ///
    /// ```
    /// use understory_spatial_hash::SpatialHashConfig;
    ///
    /// let config = SpatialHashConfig::new(500.0, 120.0, 50.0);
    /// assert_eq!(config.dimensions(), Ok((10, 3)));
    /// ```
    pub fn dimensions(&self) -> Result<(u32, u32), Error> {
        self.validate()?;
        Ok((
            cell_count(self.width, self.cell_size),
            cell_count(self.height, self.cell_size),
        ))
    }
}

fn is_positive<T: PartialOrd>(v: T, zero: T) -> bool {
    matches!(v.partial_cmp(&zero), Some(Ordering::Greater))
}
