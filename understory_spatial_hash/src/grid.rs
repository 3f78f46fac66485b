// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid cell coordinates and world-to-cell mapping.
//!
//! Cells are addressed with 1-based `(column, row)` pairs. A coordinate `v`
//! lands in cell `ceil(v / cell_size)`, so cell `c` covers the half-open span
//! `((c - 1) * cell_size, c * cell_size]`. The origin itself is special-cased
//! into cell 1, which makes cell 1 the closed span `[0, cell_size]`.

use crate::types::Scalar;

/// Scalar types supported by the grid.
///
/// This is kept separate from [`Scalar`] so that the grid implementation can
/// use type-specific logic (e.g., Euclidean division for integers).
pub trait GridScalar: Scalar {
    /// Map a scalar coordinate to a 1-based cell coordinate along one axis.
    ///
    /// Computes `ceil(value / cell_size)`, except that `0` maps to `1`.
    /// Implementations are expected to be monotonic in `value` for a fixed
    /// `cell_size`, and to saturate at the edges of the `i32` range.
    fn cell_coord(value: Self, cell_size: Self) -> i32;
}

impl GridScalar for f32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, cell_size: Self) -> i32 {
        debug_assert!(
            cell_size > 0.0,
            "grid cell_size must be strictly positive (f32)"
        );
        if value == 0.0 {
            return 1;
        }
        let t = value / cell_size;
        let coord = t as i32;

        // Round towards +∞ (the cast above has truncated towards zero).
        if t > 0.0 && (coord as Self) < t {
            coord.saturating_add(1)
        } else {
            coord
        }
    }
}

impl GridScalar for f64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, cell_size: Self) -> i32 {
        debug_assert!(
            cell_size > 0.0,
            "grid cell_size must be strictly positive (f64)"
        );
        if value == 0.0 {
            return 1;
        }
        let t = value / cell_size;
        let coord = t as i32;

        // Round towards +∞ (the cast above has truncated towards zero).
        if t > 0.0 && (coord as Self) < t {
            coord.saturating_add(1)
        } else {
            coord
        }
    }
}

impl GridScalar for i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, cell_size: Self) -> i32 {
        debug_assert!(cell_size > 0, "grid cell_size must be strictly positive (i64)");
        if value == 0 {
            return 1;
        }
        // Euclidean division rounds toward -∞ for a positive divisor; bump by
        // one when there is a remainder to get the ceiling.
        let floor = value.div_euclid(cell_size);
        let coord = if value.rem_euclid(cell_size) == 0 {
            floor
        } else {
            floor + 1
        };

        // Saturate values out of `i32` range.
        if coord >= Self::from(i32::MAX) {
            i32::MAX
        } else if coord <= Self::from(i32::MIN) {
            i32::MIN
        } else {
            coord as i32
        }
    }
}

/// A 1-based grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column, in `1..=columns`.
    pub column: u32,
    /// Row, in `1..=rows`.
    pub row: u32,
}

impl Cell {
    /// Create a cell from 1-based column and row.
    #[inline]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// The 0-based bucket index of this cell in a grid with `columns` columns.
    ///
    /// Buckets are laid out row-major: `(row - 1) * columns + (column - 1)`.
    #[inline]
    pub const fn bucket_index(self, columns: u32) -> usize {
        (self.row as usize - 1) * columns as usize + (self.column as usize - 1)
    }

    /// The neighbor at `(dc, dr)` from this cell, or `None` if it falls outside
    /// a `columns × rows` grid.
    #[inline]
    pub(crate) fn offset(self, dc: i32, dr: i32, columns: u32, rows: u32) -> Option<Self> {
        let column = self.column.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        if (1..=columns).contains(&column) && (1..=rows).contains(&row) {
            Some(Self { column, row })
        } else {
            None
        }
    }
}

/// Map a world coordinate to its (unclamped) 1-based cell coordinate.
///
/// ```
/// use understory_spatial_hash::world_to_cell;
///
/// assert_eq!(world_to_cell(0.0, 0.0, 50.0), (1, 1));
/// assert_eq!(world_to_cell(50.0, 50.1, 50.0), (1, 2));
/// assert_eq!(world_to_cell(-10.0, 120.0, 50.0), (0, 3));
/// ```
#[inline]
pub fn world_to_cell<T: GridScalar>(x: T, y: T, cell_size: T) -> (i32, i32) {
    (T::cell_coord(x, cell_size), T::cell_coord(y, cell_size))
}

/// Clamp a raw cell coordinate into a `columns × rows` grid.
///
/// Each axis is clamped independently into `[1, columns]` / `[1, rows]`.
/// `columns` and `rows` must be at least 1.
///
/// ```
/// use understory_spatial_hash::{Cell, clamp_to_grid};
///
/// assert_eq!(clamp_to_grid(0, 11, 10, 10), Cell::new(1, 10));
/// assert_eq!(clamp_to_grid(4, 5, 10, 10), Cell::new(4, 5));
/// ```
#[inline]
pub fn clamp_to_grid(column: i32, row: i32, columns: u32, rows: u32) -> Cell {
    debug_assert!(columns >= 1 && rows >= 1, "grid must have at least one cell");
    Cell {
        column: clamp_axis(column, columns),
        row: clamp_axis(row, rows),
    }
}

#[inline]
fn clamp_axis(v: i32, max: u32) -> u32 {
    match u32::try_from(v) {
        Ok(v) => v.clamp(1, max),
        Err(_) => 1,
    }
}

/// Number of cells needed to cover `extent` along one axis (at least 1).
#[inline]
pub(crate) fn cell_count<T: GridScalar>(extent: T, cell_size: T) -> u32 {
    clamp_axis(T::cell_coord(extent, cell_size), u32::MAX)
}
