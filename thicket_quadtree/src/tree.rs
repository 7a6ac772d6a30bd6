// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public quadtree container and its tuning thresholds.

use core::fmt::Debug;
use core::hash::Hash;

use alloc::vec::Vec;

use crate::node::Node;
use crate::registry::Registry;
use crate::types::{Aabb2D, Scalar};

/// Default for [`Tuning::min_cell_size`]: cells whose shorter side is at most
/// twice this never split.
pub const MIN_CELL_SIZE: u16 = 16;

/// Default for [`Tuning::max_in_cell`]: a leaf splits when its local element
/// count exceeds this.
pub const MAX_IN_CELL: usize = 8;

/// Default for [`Tuning::min_in_4_cells`]: a split node merges back into a
/// leaf when its whole subtree holds at most this many elements.
pub const MIN_IN_4_CELLS: usize = 4;

/// Side length of the universe a [`Default`] tree partitions.
const DEFAULT_SPACE_SIDE: u16 = 256;

/// Subdivision thresholds, fixed for the lifetime of a tree.
///
/// The merge threshold sits well below the split threshold; keep them apart
/// when choosing custom values, or a leaf near the boundary will split and
/// merge again on every add/remove pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tuning<T> {
    /// Quadrants are never created with a side shorter than this.
    pub min_cell_size: T,
    /// A leaf holding more local elements than this attempts to split.
    pub max_in_cell: usize,
    /// A split subtree holding this many elements or fewer collapses back
    /// into a leaf.
    pub min_in_4_cells: usize,
}

impl<T: Scalar> Default for Tuning<T> {
    fn default() -> Self {
        Self {
            min_cell_size: T::from_u16(MIN_CELL_SIZE),
            max_in_cell: MAX_IN_CELL,
            min_in_4_cells: MIN_IN_4_CELLS,
        }
    }
}

/// A collection of identity-keyed elements spatially located in an adaptive
/// 2D grid, built to answer "which elements overlap this region" quickly
/// while elements are continuously added, removed, and moved.
///
/// Cells split into four quadrants as they fill up and merge back as they
/// drain, governed by a [`Tuning`]. Each element is filed in the deepest
/// cell that fully contains its bounding box and is tracked in a side table
/// keyed by identity, so membership checks and counting are O(1) and moving
/// an element does not require the caller to remember its old box.
///
/// The element type `E` is an opaque identity: an integer handle, an `Rc`,
/// anything cheap to clone and hashable. The container never inspects it.
///
/// # Example
///
/// ```rust
/// use thicket_quadtree::{Aabb2D, Quadtree};
///
/// let mut tree: Quadtree<i64, u32> = Quadtree::new(Aabb2D::new(0, 0, 256, 256));
/// assert!(tree.add(1, Aabb2D::from_xywh(10, 10, 16, 16)));
/// assert!(tree.add(2, Aabb2D::from_xywh(200, 40, 16, 16)));
/// assert!(!tree.add(2, Aabb2D::from_xywh(0, 0, 8, 8))); // duplicate identity
///
/// let hits: Vec<u32> = tree.query_rect(Aabb2D::new(0, 0, 64, 64)).collect();
/// assert_eq!(hits, vec![1]);
///
/// // Per-frame moves are cheap while the element keeps its cell.
/// assert!(tree.update(&1, Aabb2D::from_xywh(11, 10, 16, 16)));
/// assert!(tree.remove(&2));
/// assert_eq!(tree.len(), 1);
/// ```
pub struct Quadtree<T, E> {
    space: Aabb2D<T>,
    tuning: Tuning<T>,
    registry: Registry<T, E>,
    root: Node<T, E>,
}

impl<T, E> Quadtree<T, E>
where
    T: Scalar,
    E: Clone + Eq + Hash,
{
    /// Create an empty tree over `space` with [default](Tuning::default)
    /// tuning.
    ///
    /// A non-square space is expanded around its center into a square, so
    /// quadrants subdivide evenly; [`space`](Self::space) reports the
    /// expanded rectangle. `space` must have strictly positive width and
    /// height (debug-asserted).
    pub fn new(space: Aabb2D<T>) -> Self {
        Self::with_tuning(space, Tuning::default())
    }

    /// Create an empty tree over `space` with explicit thresholds.
    pub fn with_tuning(space: Aabb2D<T>, tuning: Tuning<T>) -> Self {
        debug_assert!(
            !space.is_empty(),
            "quadtree space must have positive width and height"
        );
        let space = expand_to_square(space);
        Self {
            space,
            tuning,
            registry: Registry::new(),
            root: Node::new(space),
        }
    }

    /// Discard all elements and re-partition a new universe.
    ///
    /// Same preconditions and squaring as [`new`](Self::new); the tuning is
    /// kept.
    pub fn initialize(&mut self, space: Aabb2D<T>) {
        *self = Self::with_tuning(space, self.tuning);
    }

    /// Discard all elements. The root becomes an empty leaf over the same
    /// universe.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.root = Node::new(self.space);
    }

    /// The partitioned universe (expanded to a square at initialization).
    pub fn space(&self) -> Aabb2D<T> {
        self.space
    }

    /// The thresholds this tree was built with.
    pub fn tuning(&self) -> Tuning<T> {
        self.tuning
    }

    /// Number of indexed elements. O(1).
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `element` is currently indexed. O(1).
    pub fn contains(&self, element: &E) -> bool {
        self.registry.contains(element)
    }

    /// The bounding box `element` is currently filed under, if indexed.
    pub fn bounding_box(&self, element: &E) -> Option<Aabb2D<T>> {
        self.registry.get(element)
    }

    /// Add an element with its bounding box.
    ///
    /// Returns false and changes nothing if the identity is already indexed.
    /// A box outside the universe is accepted and counted, but no query
    /// region can reach it until it is moved inside.
    pub fn add(&mut self, element: E, bbox: Aabb2D<T>) -> bool {
        if !self.registry.record(element.clone(), bbox) {
            return false;
        }
        self.root.insert(element, bbox, &self.tuning);
        true
    }

    /// Remove an element.
    ///
    /// Returns false if the identity is not indexed. Cells left sparse by
    /// the removal are merged on the way back to the root.
    pub fn remove(&mut self, element: &E) -> bool {
        let Some(bbox) = self.registry.forget(element) else {
            return false;
        };
        let removed = self.root.remove(element, &bbox, &self.tuning);
        debug_assert!(
            removed,
            "quadtree invariant violated: registered element missing from the tree"
        );
        true
    }

    /// Move an element to a new bounding box.
    ///
    /// Call this whenever an indexed element's effective bounding box
    /// changes. Returns false if the identity is not indexed; an unchanged
    /// box is a successful no-op. While the new box keeps the element in
    /// the same cell (the common case for small per-frame motion) only the
    /// stored box is rewritten; otherwise the element is re-filed from the
    /// root, which may split or merge cells.
    pub fn update(&mut self, element: &E, bbox: Aabb2D<T>) -> bool {
        let Some(old) = self.registry.get(element) else {
            return false;
        };
        if old == bbox {
            return true;
        }
        self.registry.rewrite(element, bbox);
        if self.root.relocate_in_place(element, &old, bbox) {
            return true;
        }
        let removed = self.root.remove(element, &old, &self.tuning);
        debug_assert!(
            removed,
            "quadtree invariant violated: registered element missing from the tree"
        );
        self.root.insert(element.clone(), bbox, &self.tuning);
        true
    }

    /// Visit every element whose bounding box intersects `region`.
    ///
    /// Calls `f(element, bbox)` at most once per element, in no particular
    /// order. Subtrees disjoint from `region` are never descended.
    pub fn visit_rect<F: FnMut(&E, Aabb2D<T>)>(&self, region: Aabb2D<T>, mut f: F) {
        self.root.visit(&region, &mut |element, bbox| f(element, *bbox));
    }

    /// Iterate over the elements whose bounding box intersects `region`.
    ///
    /// Each matching element appears exactly once; a region disjoint from
    /// everything yields an empty iterator.
    pub fn query_rect(&self, region: Aabb2D<T>) -> impl Iterator<Item = E> + '_ {
        let mut out = Vec::new();
        self.visit_rect(region, |element, _| out.push(element.clone()));
        out.into_iter()
    }
}

impl<T, E> Default for Quadtree<T, E>
where
    T: Scalar,
    E: Clone + Eq + Hash,
{
    /// An empty tree over a `256 x 256` universe anchored at the origin.
    fn default() -> Self {
        let side = T::from_u16(DEFAULT_SPACE_SIDE);
        Self::new(Aabb2D::new(T::zero(), T::zero(), side, side))
    }
}

impl<T, E> Debug for Quadtree<T, E>
where
    T: Scalar,
    E: Eq + Hash,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Quadtree")
            .field("space", &self.space)
            .field("elements", &self.registry.len())
            .field("nodes", &self.root.node_count())
            .field("depth", &self.root.depth())
            .finish_non_exhaustive()
    }
}

/// Expand a rectangle around its center into a square on its longer side.
fn expand_to_square<T: Scalar>(space: Aabb2D<T>) -> Aabb2D<T> {
    let w = space.width();
    let h = space.height();
    if w > h {
        let cy = T::mid(space.min_y, space.max_y);
        let min_y = T::sub(cy, T::mid(T::zero(), w));
        Aabb2D::new(space.min_x, min_y, space.max_x, T::add(min_y, w))
    } else if h > w {
        let cx = T::mid(space.min_x, space.max_x);
        let min_x = T::sub(cx, T::mid(T::zero(), h));
        Aabb2D::new(min_x, space.min_y, T::add(min_x, h), space.max_y)
    } else {
        space
    }
}
