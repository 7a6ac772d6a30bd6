// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_quadtree --heading-base-level=0

//! Thicket Quadtree: an adaptive 2D quadtree for identity-keyed bounding boxes.
//!
//! The main goal of this container is to answer "which elements overlap this
//! region" as quickly as possible while the set of elements changes every
//! frame:
//!
//! - Add, remove, and move axis-aligned bounding boxes keyed by an opaque
//!   element identity (an integer handle, an `Rc`, anything hashable).
//! - Query by intersecting rectangle with [`Quadtree::query_rect`] or the
//!   allocation-free [`Quadtree::visit_rect`].
//! - Cells split into four quadrants as they fill and merge back as they
//!   drain; the thresholds are per-tree [`Tuning`].
//!
//! Each element lives in the deepest cell that fully contains its box, and a
//! side table keyed by identity remembers the box, so membership checks and
//! counting are O(1) and callers never supply the old box when moving or
//! removing. Duplicate adds and operations on unindexed identities report
//! failure by returning `false` rather than panicking.
//!
//! It is generic over the coordinate scalar `T` (`f32`, `f64`, `i32`,
//! `i64`) and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use thicket_quadtree::{Aabb2D, Quadtree};
//!
//! // Index a 256x256 world.
//! let mut tree: Quadtree<i64, u32> = Quadtree::new(Aabb2D::new(0, 0, 256, 256));
//! tree.add(1, Aabb2D::from_xywh(10, 10, 16, 16));
//! tree.add(2, Aabb2D::from_xywh(200, 40, 16, 16));
//!
//! let hits: Vec<u32> = tree.query_rect(Aabb2D::new(0, 0, 64, 64)).collect();
//! assert_eq!(hits, vec![1]);
//!
//! // Per-frame motion: cheap while the element stays in its cell.
//! tree.update(&1, Aabb2D::from_xywh(12, 10, 16, 16));
//! assert!(tree.query_rect(Aabb2D::new(0, 0, 64, 64)).any(|id| id == 1));
//!
//! tree.remove(&2);
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! Trees with different workloads can tune the subdivision thresholds:
//!
//! ```rust
//! use thicket_quadtree::{Aabb2D, Quadtree, Tuning};
//!
//! let tuning = Tuning {
//!     min_cell_size: 1.0,
//!     max_in_cell: 4,
//!     min_in_4_cells: 2,
//! };
//! let space = Aabb2D::new(0.0, 0.0, 64.0, 64.0);
//! let mut tree: Quadtree<f32, &str> = Quadtree::with_tuning(space, tuning);
//! tree.add("hero", Aabb2D::from_xywh(4.0, 4.0, 8.0, 8.0));
//! assert!(tree.contains(&"hero"));
//! ```
//!
//! ## Caller contract
//!
//! The index reflects only what it is told: call [`Quadtree::update`]
//! whenever an indexed element's effective bounding box changes, and
//! [`Quadtree::remove`] before the element becomes invalid. Stale entries
//! return stale results; they never corrupt the tree. The container is
//! single-threaded: queries may run freely during read-only traversals, but
//! mutation must not overlap with other access.

#![no_std]

extern crate alloc;

mod node;
mod registry;
mod tree;
mod types;

pub use tree::{MAX_IN_CELL, MIN_CELL_SIZE, MIN_IN_4_CELLS, Quadtree, Tuning};
pub use types::{Aabb2D, Scalar};
