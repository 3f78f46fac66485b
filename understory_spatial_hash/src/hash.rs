// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded uniform-grid spatial hash.
//!
//! Each tracked shape lives in exactly one bucket: the cell holding the
//! minimum corner of its AABB, clamped to the grid. Because no shape may be
//! larger than a cell, a shape can only overlap shapes from its own cell and
//! the eight cells around it, and only from the east/south cells when its own
//! extent crosses into them.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::config::SpatialHashConfig;
use crate::error::Error;
use crate::grid::{Cell, GridScalar, clamp_to_grid, world_to_cell};
use crate::query::{CollidingPairs, Collisions};
use crate::shape::Bounded;
use crate::types::Aabb2D;

/// Handle for a shape tracked by a [`SpatialHash`].
///
/// Handles are handed out in increasing order by each hash and never reused,
/// so the ordering of two handles is the order in which they were inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

impl ShapeId {
    /// The raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where a tracked shape currently sits in the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement<T> {
    /// 0-based index of the bucket holding the shape.
    pub bucket: usize,
    /// Cell of the shape's minimum corner, clamped to the grid.
    pub cell: Cell,
    /// Bounding box reported by the shape at its last insert or update.
    pub aabb: Aabb2D<T>,
}

type Bucket = SmallVec<[ShapeId; 8]>;

// Own cell plus west, north and north-west: always scanned.
const BACKWARD: [(i32, i32); 4] = [(0, 0), (-1, 0), (0, -1), (-1, -1)];
const EAST: [(i32, i32); 2] = [(1, 0), (1, -1)];
const SOUTH: [(i32, i32); 2] = [(0, 1), (-1, 1)];
const SOUTH_EAST: (i32, i32) = (1, 1);
const NORTH_EAST: (i32, i32) = (1, -1);

/// Uniform-grid spatial hash over a bounded world.
///
/// See the [crate docs][crate] for an overview.
pub struct SpatialHash<T: GridScalar> {
    width: T,
    height: T,
    cell_size: T,
    columns: u32,
    rows: u32,
    buckets: Vec<Bucket>,
    placements: HashMap<ShapeId, Placement<T>>,
    next_id: u64,
}

impl<T: GridScalar> Debug for SpatialHash<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        f.debug_struct("SpatialHash")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("shapes", &self.placements.len())
            .field("occupied_buckets", &occupied)
            .finish_non_exhaustive()
    }
}

impl<T: GridScalar> SpatialHash<T> {
    /// Create an empty hash covering `[0, width] × [0, height]`.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if any parameter is not
    /// strictly positive.
    pub fn new(width: T, height: T, cell_size: T) -> Result<Self, Error> {
        Self::from_config(SpatialHashConfig::new(width, height, cell_size))
    }

    /// Create an empty hash from a [`SpatialHashConfig`].
    pub fn from_config(config: SpatialHashConfig<T>) -> Result<Self, Error> {
        let (columns, rows) = config.dimensions()?;
        let count = (columns as usize)
            .checked_mul(rows as usize)
            .ok_or(Error::InvalidConfiguration {
                reason: "bucket count overflows usize",
            })?;

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(count)
            .map_err(|_| Error::InvalidConfiguration {
                reason: "bucket grid is too large to allocate",
            })?;
        buckets.resize_with(count, Bucket::new);

        tracing::debug!(columns, rows, buckets = count, "created spatial hash");
        Ok(Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            columns,
            rows,
            buckets,
            placements: HashMap::new(),
            next_id: 0,
        })
    }

    /// World width.
    pub fn width(&self) -> T {
        self.width
    }

    /// World height.
    pub fn height(&self) -> T {
        self.height
    }

    /// Cell edge length.
    pub fn cell_size(&self) -> T {
        self.cell_size
    }

    /// Number of grid columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of grid rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of buckets (`columns × rows`).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of tracked shapes.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if no shape is tracked.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns true if `id` refers to a tracked shape.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.placements.contains_key(&id)
    }

    /// Current placement of a tracked shape.
    pub fn placement(&self, id: ShapeId) -> Option<Placement<T>> {
        self.placements.get(&id).copied()
    }

    /// Shapes in the bucket at 1-based `(column, row)`, in insertion order.
    ///
    /// Returns `None` outside the grid.
    pub fn bucket(&self, column: u32, row: u32) -> Option<&[ShapeId]> {
        if !(1..=self.columns).contains(&column) || !(1..=self.rows).contains(&row) {
            return None;
        }
        let cell = Cell::new(column, row);
        Some(&self.buckets[cell.bucket_index(self.columns)])
    }

    /// The clamped cell a bounding box would be placed in.
    pub fn cell_of(&self, aabb: &Aabb2D<T>) -> Cell {
        let (column, row) = world_to_cell(aabb.min_x, aabb.min_y, self.cell_size);
        clamp_to_grid(column, row, self.columns, self.rows)
    }

    /// Start tracking `shape` and return its handle.
    ///
    /// Fails with [`Error::InvalidShape`] for a malformed bounding box and
    /// [`Error::ShapeTooLarge`] when the box is wider or taller than the cell
    /// size. Boxes outside the world are clamped into the nearest edge cell.
    pub fn insert<S: Bounded<T> + ?Sized>(&mut self, shape: &S) -> Result<ShapeId, Error> {
        let aabb = shape.aabb();
        self.check_aabb(&aabb)?;

        let id = ShapeId(self.next_id);
        self.next_id += 1;

        let cell = self.cell_of(&aabb);
        let bucket = cell.bucket_index(self.columns);
        self.buckets[bucket].push(id);
        self.placements.insert(id, Placement { bucket, cell, aabb });

        tracing::debug!(
            id = id.get(),
            column = cell.column,
            row = cell.row,
            "inserted shape"
        );
        Ok(id)
    }

    /// Stop tracking a shape.
    ///
    /// Returns whether the shape was tracked. Removing an unknown or already
    /// removed handle does nothing.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        let Some(placement) = self.placements.remove(&id) else {
            return false;
        };
        self.detach(id, placement.bucket);
        tracing::debug!(id = id.get(), "removed shape");
        true
    }

    /// Refresh a tracked shape after its geometry changed.
    ///
    /// The bounding box is re-checked as on [`insert`][Self::insert]; on error
    /// the previous placement is kept. If the shape's cell is unchanged, only
    /// the stored bounding box is refreshed and bucket membership is left
    /// alone. Returns `Ok(true)` if the shape moved to another bucket.
    pub fn update<S: Bounded<T> + ?Sized>(&mut self, id: ShapeId, shape: &S) -> Result<bool, Error> {
        let aabb = shape.aabb();
        self.check_aabb(&aabb)?;
        let cell = self.cell_of(&aabb);
        let columns = self.columns;

        let placement = self
            .placements
            .get_mut(&id)
            .ok_or(Error::UnknownShape(id))?;
        placement.aabb = aabb;
        if placement.cell == cell {
            return Ok(false);
        }

        let old_bucket = placement.bucket;
        let new_bucket = cell.bucket_index(columns);
        placement.cell = cell;
        placement.bucket = new_bucket;

        self.detach(id, old_bucket);
        self.buckets[new_bucket].push(id);
        tracing::debug!(
            id = id.get(),
            column = cell.column,
            row = cell.row,
            "relocated shape"
        );
        Ok(true)
    }

    /// Remove all shapes. Handles are not reused afterwards.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.placements.clear();
        tracing::debug!("cleared spatial hash");
    }

    /// Shapes whose bounding box overlaps the bounding box of `id`.
    ///
    /// Only the shape's own bucket and the neighbors its extent can reach are
    /// scanned. The shape itself is never reported. An unknown handle yields
    /// an empty result.
    pub fn colliding_with(&self, id: ShapeId) -> Collisions {
        let mut hits = Vec::new();
        let tests = self.visit_colliding_with(id, |other| hits.push(other));
        Collisions { hits, tests }
    }

    /// Visit shapes whose bounding box overlaps the bounding box of `id`
    /// (does not allocate result storage).
    ///
    /// Returns the number of AABB tests performed.
    pub fn visit_colliding_with<F: FnMut(ShapeId)>(&self, id: ShapeId, mut f: F) -> usize {
        let Some(placement) = self.placements.get(&id) else {
            return 0;
        };
        let (east, south) = self.reach(placement);

        let mut offsets: SmallVec<[(i32, i32); 9]> = SmallVec::from_slice(&BACKWARD);
        if east {
            offsets.extend_from_slice(&EAST);
        }
        if south {
            offsets.extend_from_slice(&SOUTH);
        }
        if east && south {
            offsets.push(SOUTH_EAST);
        }

        let mut tests = 0;
        for (dc, dr) in offsets {
            let Some(cell) = placement.cell.offset(dc, dr, self.columns, self.rows) else {
                continue;
            };
            for &other in &self.buckets[cell.bucket_index(self.columns)] {
                if other == id {
                    continue;
                }
                tests += 1;
                if placement.aabb.overlaps(&self.placements[&other].aabb) {
                    f(other);
                }
            }
        }
        tracing::trace!(id = id.get(), tests, "colliding_with");
        tests
    }

    /// Unique overlapping pairs among `shapes`.
    ///
    /// Pass every active shape to get every overlapping pair in the grid;
    /// [`all_colliding_pairs`][Self::all_colliding_pairs] does exactly that.
    /// Unknown and repeated handles are skipped.
    ///
    /// Each shape scans its own bucket, pairing only with lower ids, then the
    /// west, north and north-west buckets, plus north-east when its extent
    /// crosses its cell's east edge. Every pair of neighboring cells is thus
    /// visited from one side only and needs no further filtering.
    pub fn colliding_pairs<I>(&self, shapes: I) -> CollidingPairs
    where
        I: IntoIterator<Item = ShapeId>,
    {
        let mut out = CollidingPairs::default();
        let mut seen: HashSet<ShapeId> = HashSet::new();
        for id in shapes {
            if !seen.insert(id) {
                continue;
            }
            let Some(placement) = self.placements.get(&id) else {
                continue;
            };
            let (east, _) = self.reach(placement);

            let mut offsets: SmallVec<[(i32, i32); 5]> = SmallVec::from_slice(&BACKWARD);
            if east {
                offsets.push(NORTH_EAST);
            }

            for (dc, dr) in offsets {
                let Some(cell) = placement.cell.offset(dc, dr, self.columns, self.rows) else {
                    continue;
                };
                let own = (dc, dr) == (0, 0);
                for &other in &self.buckets[cell.bucket_index(self.columns)] {
                    if other == id || (own && other > id) {
                        continue;
                    }
                    out.tests += 1;
                    if placement.aabb.overlaps(&self.placements[&other].aabb) {
                        out.push(id, other);
                    }
                }
            }
        }
        tracing::trace!(pairs = out.pairs.len(), tests = out.tests, "colliding_pairs");
        out
    }

    /// Unique overlapping pairs among all tracked shapes.
    ///
    /// Shapes are scanned bucket by bucket in row-major order, so the output
    /// order is deterministic.
    pub fn all_colliding_pairs(&self) -> CollidingPairs {
        self.colliding_pairs(self.buckets.iter().flatten().copied())
    }

    /// Shapes whose stored bounding box strictly overlaps `rect`.
    ///
    /// `rect` is not tracked and may span any number of cells.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> Collisions {
        let mut hits = Vec::new();
        let tests = self.visit_rect(rect, |id| hits.push(id));
        Collisions { hits, tests }
    }

    /// Visit shapes whose stored bounding box strictly overlaps `rect` (does
    /// not allocate result storage).
    ///
    /// Returns the number of AABB tests performed.
    pub fn visit_rect<F: FnMut(ShapeId)>(&self, rect: Aabb2D<T>, mut f: F) -> usize {
        if !rect.is_well_formed() {
            return 0;
        }
        self.visit_span(&rect, |aabb| aabb.overlaps(&rect), &mut f)
    }

    /// Shapes whose stored bounding box contains the point (edges included).
    pub fn query_point(&self, x: T, y: T) -> Collisions {
        let mut hits = Vec::new();
        let span = Aabb2D::new(x, y, x, y);
        let tests = self.visit_span(&span, |aabb| aabb.contains_point(x, y), &mut |id| {
            hits.push(id);
        });
        Collisions { hits, tests }
    }

    /// Test every shape whose bucket could hold a box reaching into `span`.
    ///
    /// A shape is at most one cell wide, so its minimum corner lies no more
    /// than one cell before `span`'s minimum corner.
    fn visit_span<P, F>(&self, span: &Aabb2D<T>, pred: P, f: &mut F) -> usize
    where
        P: Fn(&Aabb2D<T>) -> bool,
        F: FnMut(ShapeId),
    {
        let (c0, r0) = world_to_cell(span.min_x, span.min_y, self.cell_size);
        let (c1, r1) = world_to_cell(span.max_x, span.max_y, self.cell_size);
        let lo = clamp_to_grid(c0.saturating_sub(1), r0.saturating_sub(1), self.columns, self.rows);
        let hi = clamp_to_grid(c1, r1, self.columns, self.rows);

        let mut tests = 0;
        for row in lo.row..=hi.row {
            for column in lo.column..=hi.column {
                let bucket = Cell::new(column, row).bucket_index(self.columns);
                for &id in &self.buckets[bucket] {
                    tests += 1;
                    if pred(&self.placements[&id].aabb) {
                        f(id);
                    }
                }
            }
        }
        tests
    }

    /// Whether the shape's extent crosses the east and south edges of its cell.
    fn reach(&self, placement: &Placement<T>) -> (bool, bool) {
        let (max_column, max_row) =
            world_to_cell(placement.aabb.max_x, placement.aabb.max_y, self.cell_size);
        (
            i64::from(max_column) > i64::from(placement.cell.column),
            i64::from(max_row) > i64::from(placement.cell.row),
        )
    }

    fn check_aabb(&self, aabb: &Aabb2D<T>) -> Result<(), Error> {
        if !aabb.is_well_formed() {
            return Err(Error::InvalidShape);
        }
        if aabb.max_extent() > self.cell_size {
            return Err(Error::ShapeTooLarge);
        }
        Ok(())
    }

    fn detach(&mut self, id: ShapeId, bucket: usize) {
        let bucket = &mut self.buckets[bucket];
        let pos = bucket.iter().position(|&s| s == id);
        debug_assert!(
            pos.is_some(),
            "spatial hash invariant violated: shape missing from its recorded bucket"
        );
        if let Some(pos) = pos {
            // Keep insertion order.
            bucket.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn scene() -> SpatialHash<f64> {
        SpatialHash::new(500.0, 500.0, 50.0).unwrap()
    }

    #[test]
    fn grid_dimensions() {
        let hash = scene();
        assert_eq!(hash.columns(), 10);
        assert_eq!(hash.rows(), 10);
        assert_eq!(hash.bucket_count(), 100);
        assert!(hash.is_empty());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(matches!(
            SpatialHash::new(0.0, 10.0, 1.0),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            SpatialHash::new(10, 10, -5),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn overlapping_shapes_in_first_cell_form_one_pair() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0)).unwrap();

        assert_eq!(hash.placement(a).unwrap().cell, Cell::new(1, 1));
        assert_eq!(hash.placement(b).unwrap().cell, Cell::new(1, 1));
        assert_eq!(hash.bucket(1, 1), Some(&[a, b][..]));

        let pairs = hash.colliding_pairs([a, b]);
        assert_eq!(pairs.pairs, vec![(a, b)]);
        assert_eq!(pairs.tests, 1);
    }

    #[test]
    fn out_of_world_shape_clamps_to_last_cell() {
        let mut hash = scene();
        let c = hash.insert(&Aabb2D::new(500.0, 500.0, 540.0, 540.0)).unwrap();
        let placement = hash.placement(c).unwrap();
        assert_eq!(placement.cell, Cell::new(10, 10));
        assert_eq!(placement.bucket, 99);

        let d = hash.insert(&Aabb2D::new(-30.0, -30.0, -1.0, -1.0)).unwrap();
        assert_eq!(hash.placement(d).unwrap().cell, Cell::new(1, 1));
    }

    #[test]
    fn oversized_and_malformed_shapes_are_rejected() {
        let mut hash = scene();
        assert_eq!(
            hash.insert(&Aabb2D::new(0.0, 0.0, 60.0, 10.0)),
            Err(Error::ShapeTooLarge)
        );
        assert_eq!(
            hash.insert(&Aabb2D::new(0.0, 0.0, 10.0, 60.0)),
            Err(Error::ShapeTooLarge)
        );
        assert_eq!(
            hash.insert(&Aabb2D::new(10.0, 0.0, 0.0, 10.0)),
            Err(Error::InvalidShape)
        );
        assert_eq!(
            hash.insert(&Aabb2D::new(f64::NAN, 0.0, 10.0, 10.0)),
            Err(Error::InvalidShape)
        );
        // Exactly one cell wide is allowed.
        assert!(hash.insert(&Aabb2D::new(0.0, 0.0, 50.0, 50.0)).is_ok());
        assert_eq!(hash.len(), 1);
    }

    #[test]
    fn ids_increase_and_are_not_reused() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(hash.remove(a));
        let b = hash.insert(&Aabb2D::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(b > a);
        hash.clear();
        let c = hash.insert(&Aabb2D::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(c > b);
    }

    #[test]
    fn query_never_reports_self() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0)).unwrap();

        let hits = hash.colliding_with(a);
        assert_eq!(hits.hits, vec![b]);
        assert_eq!(hits.tests, 1);
        assert_eq!(hash.colliding_with(b).hits, vec![a]);
    }

    #[test]
    fn touching_shapes_do_not_collide() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 50.0, 50.0)).unwrap();
        let _b = hash.insert(&Aabb2D::new(50.0, 10.0, 90.0, 50.0)).unwrap();
        assert!(hash.colliding_with(a).is_empty());
        assert!(hash.all_colliding_pairs().is_empty());
    }

    #[test]
    fn neighbors_across_cell_edges_are_found_once() {
        let mut hash = scene();
        // Straddles the edge between columns 1 and 2 and rows 1 and 2.
        let a = hash.insert(&Aabb2D::new(30.0, 30.0, 70.0, 70.0)).unwrap();
        let east = hash.insert(&Aabb2D::new(60.0, 35.0, 80.0, 45.0)).unwrap();
        let south = hash.insert(&Aabb2D::new(35.0, 60.0, 45.0, 80.0)).unwrap();
        let south_east = hash.insert(&Aabb2D::new(65.0, 65.0, 90.0, 90.0)).unwrap();
        let far = hash.insert(&Aabb2D::new(200.0, 200.0, 210.0, 210.0)).unwrap();

        let mut hits = hash.colliding_with(a).hits;
        hits.sort();
        assert_eq!(hits, vec![east, south, south_east]);
        assert!(hash.colliding_with(far).is_empty());

        let mut pairs = hash.all_colliding_pairs().pairs;
        pairs.sort();
        assert_eq!(pairs, vec![(a, east), (a, south), (a, south_east)]);
    }

    #[test]
    fn north_east_neighbors_are_paired() {
        let mut hash = scene();
        // Cell (1, 2), extends east into column 2.
        let a = hash.insert(&Aabb2D::new(40.0, 55.0, 60.0, 70.0)).unwrap();
        // Cell (2, 1), extends south into row 2.
        let b = hash.insert(&Aabb2D::new(55.0, 40.0, 70.0, 60.0)).unwrap();

        assert_eq!(hash.colliding_with(a).hits, vec![b]);
        assert_eq!(hash.colliding_with(b).hits, vec![a]);
        assert_eq!(hash.all_colliding_pairs().pairs, vec![(a, b)]);
    }

    #[test]
    fn update_without_cell_change_is_noop_for_buckets() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0)).unwrap();
        let before = hash.colliding_with(a);
        let placement = hash.placement(a).unwrap();

        assert_eq!(hash.update(a, &Aabb2D::new(10.0, 10.0, 40.0, 40.0)), Ok(false));
        assert_eq!(hash.placement(a).unwrap(), placement);
        assert_eq!(hash.bucket(1, 1), Some(&[a, b][..]));
        assert_eq!(hash.colliding_with(a), before);

        // Moving inside the same cell refreshes the box but keeps bucket order.
        assert_eq!(hash.update(a, &Aabb2D::new(1.0, 1.0, 5.0, 5.0)), Ok(false));
        assert_eq!(hash.bucket(1, 1), Some(&[a, b][..]));
        assert!(hash.colliding_with(a).is_empty());
    }

    #[test]
    fn update_relocates_between_buckets() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        assert_eq!(hash.update(a, &Aabb2D::new(260.0, 110.0, 290.0, 140.0)), Ok(true));

        let placement = hash.placement(a).unwrap();
        assert_eq!(placement.cell, Cell::new(6, 3));
        assert_eq!(placement.bucket, 25);
        assert_eq!(hash.bucket(1, 1), Some(&[][..]));
        assert_eq!(hash.bucket(6, 3), Some(&[a][..]));
    }

    #[test]
    fn failed_update_keeps_previous_placement() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let placement = hash.placement(a).unwrap();

        assert_eq!(
            hash.update(a, &Aabb2D::new(100.0, 100.0, 200.0, 120.0)),
            Err(Error::ShapeTooLarge)
        );
        assert_eq!(hash.placement(a), Some(placement));

        hash.remove(a);
        assert_eq!(
            hash.update(a, &Aabb2D::new(10.0, 10.0, 40.0, 40.0)),
            Err(Error::UnknownShape(a))
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0)).unwrap();

        assert!(hash.remove(a));
        assert!(!hash.remove(a));
        assert_eq!(hash.len(), 1);
        assert_eq!(hash.bucket(1, 1), Some(&[b][..]));
        assert!(hash.colliding_with(b).is_empty());
        assert!(hash.colliding_with(a).is_empty());
        assert!(hash.colliding_pairs([a, b]).is_empty());
    }

    #[test]
    fn repeated_ids_in_pair_query_are_skipped() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0)).unwrap();
        assert_eq!(hash.colliding_pairs([b, a, b, a]).pairs, vec![(a, b)]);
    }

    #[test]
    fn rect_and_point_queries() {
        let mut hash = scene();
        let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0)).unwrap();
        let b = hash.insert(&Aabb2D::new(140.0, 140.0, 160.0, 160.0)).unwrap();
        let _c = hash.insert(&Aabb2D::new(400.0, 400.0, 420.0, 420.0)).unwrap();

        let mut hits = hash.query_rect(Aabb2D::new(30.0, 30.0, 150.0, 150.0)).hits;
        hits.sort();
        assert_eq!(hits, vec![a, b]);

        assert_eq!(hash.query_point(40.0, 40.0).hits, vec![a]);
        assert_eq!(hash.query_point(150.0, 150.0).hits, vec![b]);
        assert!(hash.query_point(300.0, 300.0).is_empty());
        assert!(hash.query_rect(Aabb2D::new(10.0, 10.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn works_with_user_shapes_and_integer_coordinates() {
        struct Square {
            x: i64,
            y: i64,
            side: i64,
        }
        impl Bounded<i64> for Square {
            fn aabb(&self) -> Aabb2D<i64> {
                Aabb2D::from_xywh(self.x, self.y, self.side, self.side)
            }
        }

        let mut hash = SpatialHash::new(100_i64, 100, 10).unwrap();
        let mut p = Square { x: 5, y: 5, side: 10 };
        let q = Square { x: 12, y: 12, side: 4 };
        let pid = hash.insert(&p).unwrap();
        let qid = hash.insert(&q).unwrap();
        assert_eq!(hash.all_colliding_pairs().pairs, vec![(pid, qid)]);

        p.x = 50;
        assert_eq!(hash.update(pid, &p), Ok(true));
        assert!(hash.all_colliding_pairs().is_empty());
    }
}
