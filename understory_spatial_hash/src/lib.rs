// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spatial_hash --heading-base-level=0

//! Understory Spatial Hash: a bounded uniform-grid broad phase for 2D AABBs.
//!
//! Understory Spatial Hash finds candidate collision pairs among a dynamic set of
//! axis-aligned bounding boxes without comparing every box against every other.
//!
//! - Insert, update, and remove shapes that implement [`Bounded`]; each insert returns a [`ShapeId`].
//! - Ask which shapes overlap one tracked shape ([`SpatialHash::colliding_with`]).
//! - Collect every overlapping pair exactly once ([`SpatialHash::colliding_pairs`]).
//!
//! The world `[0, width] × [0, height]` is split into square cells of `cell_size`. Each shape is
//! kept in the single bucket holding the minimum corner of its AABB, clamped into the grid, and
//! must be no larger than one cell on either axis. That bound keeps every neighbor search within
//! the 3×3 block of cells around a shape.
//!
//! The hash does not own shapes. It keeps a side table from [`ShapeId`] to the shape's
//! [`Placement`] (bucket, cell and last reported AABB), so shapes can be immutable or owned
//! elsewhere. Call [`SpatialHash::update`] whenever a tracked shape moves or changes size.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and does not depend on any
//! geometry crate.
//!
//! # Example
//!
//! ```rust
//! use understory_spatial_hash::{Aabb2D, SpatialHash};
//!
//! // A 500×500 world with 50-unit cells: 10 columns × 10 rows.
//! let mut hash = SpatialHash::<f64>::new(500.0, 500.0, 50.0)?;
//! assert_eq!(hash.bucket_count(), 100);
//!
//! let a = hash.insert(&Aabb2D::new(10.0, 10.0, 40.0, 40.0))?;
//! let b = hash.insert(&Aabb2D::new(20.0, 20.0, 50.0, 50.0))?;
//!
//! let pairs = hash.colliding_pairs([a, b]);
//! assert_eq!(pairs.pairs, [(a, b)]);
//!
//! // Move `b` away; the pair disappears.
//! hash.update(b, &Aabb2D::new(300.0, 300.0, 330.0, 330.0))?;
//! assert!(hash.colliding_with(a).is_empty());
//! # Ok::<(), understory_spatial_hash::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std`: enables `std` support in `tracing` and `thiserror`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`SpatialHashConfig`] and [`Aabb2D`].
//!
//! ## Logging
//!
//! Structural changes (create, insert, relocate, remove, clear) emit `tracing` events at
//! `debug` level; queries emit their test counts at `trace` level. No subscriber is installed.
//!
//! ### Float semantics
//!
//! Boxes with NaN coordinates are rejected with [`Error::InvalidShape`]. Touching edges do not
//! count as overlapping.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod grid;
mod hash;
mod query;
mod shape;
mod types;

pub use config::SpatialHashConfig;
pub use error::Error;
pub use grid::{Cell, GridScalar, clamp_to_grid, world_to_cell};
pub use hash::{Placement, ShapeId, SpatialHash};
pub use query::{CollidingPairs, Collisions};
pub use shape::Bounded;
pub use types::{Aabb2D, Scalar};
