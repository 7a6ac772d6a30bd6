// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive tree cells: adaptive subdivision, bottom-up merging.

use alloc::boxed::Box;

use smallvec::SmallVec;

use crate::tree::Tuning;
use crate::types::{Aabb2D, Scalar};

/// Elements owned directly by a node, paired with their bounding boxes.
type LocalVec<T, E> = SmallVec<[(E, Aabb2D<T>); 4]>;

/// One cell of the tree.
///
/// A node is a leaf (`children` is `None`) or split into exactly four
/// quadrant children (NW, NE, SW, SE). Every indexed element lives in the
/// `local` list of exactly one node: the deepest cell that fully contains
/// its bounding box. An entry kept in a split node's `local` therefore
/// straddles at least one child boundary.
pub(crate) struct Node<T, E> {
    cell: Aabb2D<T>,
    local: LocalVec<T, E>,
    children: Option<Box<[Self; 4]>>,
}

impl<T: Scalar, E: PartialEq> Node<T, E> {
    pub(crate) fn new(cell: Aabb2D<T>) -> Self {
        Self {
            cell,
            local: SmallVec::new(),
            children: None,
        }
    }

    pub(crate) fn is_split(&self) -> bool {
        self.children.is_some()
    }

    /// Elements in this subtree: the local list plus all descendants.
    pub(crate) fn len(&self) -> usize {
        let mut n = self.local.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                n += child.len();
            }
        }
        n
    }

    /// Insert an element at the deepest cell that fully contains `bbox`.
    ///
    /// A leaf that grows past `max_in_cell` splits, unless its quadrants
    /// would fall under `min_cell_size`.
    pub(crate) fn insert(&mut self, element: E, bbox: Aabb2D<T>, tuning: &Tuning<T>) {
        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children.iter_mut().find(|c| c.cell.contains_box(&bbox)) {
                child.insert(element, bbox, tuning);
                return;
            }
            // Straddles a child boundary: this node owns it.
            self.local.push((element, bbox));
        } else {
            self.local.push((element, bbox));
            if self.local.len() > tuning.max_in_cell {
                self.try_split(tuning);
            }
        }
    }

    /// Remove an element, retracing the containment decision that placed it.
    ///
    /// On the way back up, every split ancestor whose subtree has shrunk to
    /// `min_in_4_cells` elements or fewer collapses back into a leaf, so one
    /// removal can cascade merges over several levels.
    pub(crate) fn remove(&mut self, element: &E, bbox: &Aabb2D<T>, tuning: &Tuning<T>) -> bool {
        let removed = if let Some(children) = self.children.as_mut() {
            if let Some(child) = children.iter_mut().find(|c| c.cell.contains_box(bbox)) {
                child.remove(element, bbox, tuning)
            } else {
                self.erase_local(element)
            }
        } else {
            self.erase_local(element)
        };
        if removed && self.is_split() && self.len() <= tuning.min_in_4_cells {
            self.merge();
        }
        removed
    }

    /// Rewrite an element's bounding box without restructuring, if the
    /// ownership decision is the same under `old` and `new`.
    ///
    /// Descends only while both boxes select the same child. Returns false
    /// as soon as the decisions diverge; the caller then falls back to a
    /// remove-and-reinsert from the root. Nothing is modified on failure.
    pub(crate) fn relocate_in_place(
        &mut self,
        element: &E,
        old: &Aabb2D<T>,
        new: Aabb2D<T>,
    ) -> bool {
        if let Some(children) = self.children.as_mut() {
            let old_slot = children.iter().position(|c| c.cell.contains_box(old));
            let new_slot = children.iter().position(|c| c.cell.contains_box(&new));
            return match (old_slot, new_slot) {
                (Some(a), Some(b)) if a == b => children[a].relocate_in_place(element, old, new),
                (None, None) => self.rewrite_local(element, new),
                _ => false,
            };
        }
        // The ancestors already agreed on the path down, and a leaf makes no
        // further decision, so the element stays put.
        self.rewrite_local(element, new)
    }

    /// Collect elements whose bounding box intersects `region`.
    ///
    /// Subtrees whose cell misses the region are pruned without descending.
    pub(crate) fn visit<F: FnMut(&E, &Aabb2D<T>)>(&self, region: &Aabb2D<T>, f: &mut F) {
        if !self.cell.intersects(region) {
            return;
        }
        for (element, bbox) in &self.local {
            if bbox.intersects(region) {
                f(element, bbox);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.visit(region, f);
            }
        }
    }

    /// Nodes in this subtree, counting this one.
    pub(crate) fn node_count(&self) -> usize {
        let mut n = 1;
        if let Some(children) = &self.children {
            for child in children.iter() {
                n += child.node_count();
            }
        }
        n
    }

    /// Height of this subtree; a leaf has depth 1.
    pub(crate) fn depth(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    fn erase_local(&mut self, element: &E) -> bool {
        match self.local.iter().position(|(e, _)| e == element) {
            Some(i) => {
                self.local.swap_remove(i);
                true
            }
            None => false,
        }
    }

    fn rewrite_local(&mut self, element: &E, new: Aabb2D<T>) -> bool {
        let entry = self
            .local
            .iter_mut()
            .find(|(e, _)| e == element)
            .expect("quadtree invariant violated: element missing from its owning node");
        entry.1 = new;
        true
    }

    /// Split into four quadrant children and push down every local entry
    /// that fits inside one of them, leaving boundary straddlers behind.
    ///
    /// Does nothing if the quadrants would be thinner than `min_cell_size`.
    fn try_split(&mut self, tuning: &Tuning<T>) {
        let floor = T::add(tuning.min_cell_size, tuning.min_cell_size);
        if T::min(self.cell.width(), self.cell.height()) <= floor {
            return;
        }
        self.children = Some(Box::new(self.cell.quadrants().map(Self::new)));
        let entries = core::mem::take(&mut self.local);
        for (element, bbox) in entries {
            // A child receiving many entries may split again right away.
            self.insert(element, bbox, tuning);
        }
    }

    /// Collapse the four children, absorbing every descendant element into
    /// this node's local list.
    fn merge(&mut self) {
        let children = self
            .children
            .take()
            .expect("quadtree invariant violated: merging a leaf node");
        for child in *children {
            child.drain_into(&mut self.local);
        }
    }

    fn drain_into(self, out: &mut LocalVec<T, E>) {
        out.extend(self.local);
        if let Some(children) = self.children {
            for child in *children {
                child.drain_into(out);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn local_len(&self) -> usize {
        self.local.len()
    }

    #[cfg(test)]
    pub(crate) fn child(&self, slot: usize) -> &Self {
        &self.children.as_ref().expect("node is a leaf")[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::tree::Tuning;
    use crate::types::Aabb2D;

    fn node() -> Node<i64, u32> {
        Node::new(Aabb2D::new(0, 0, 256, 256))
    }

    #[test]
    fn overflowing_leaf_splits_and_straddler_stays_local() {
        let tuning = Tuning::default();
        let mut root = node();
        for i in 0..9 {
            root.insert(i, Aabb2D::from_xywh(i64::from(i) * 8, 8, 4, 4), &tuning);
        }
        assert!(root.is_split());
        // All nine fit the north-west quadrant.
        assert_eq!(root.local_len(), 0);
        assert_eq!(root.child(0).len(), 9);

        root.insert(100, Aabb2D::new(124, 124, 132, 132), &tuning);
        assert!(root.is_split());
        assert_eq!(root.local_len(), 1);
        assert_eq!(root.len(), 10);
    }

    #[test]
    fn removal_back_below_threshold_merges() {
        let tuning = Tuning::default();
        let mut root = node();
        for i in 0..9 {
            root.insert(i, Aabb2D::from_xywh(i64::from(i) * 8, 8, 4, 4), &tuning);
        }
        assert!(root.is_split());
        for i in 0..5 {
            assert!(root.remove(&i, &Aabb2D::from_xywh(i64::from(i) * 8, 8, 4, 4), &tuning));
        }
        assert!(!root.is_split());
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn remove_retraces_the_insert_decision() {
        let tuning = Tuning::default();
        let mut root = node();
        // Force a split, then target a box that ends exactly on the center
        // line: insertion sends it west, and removal must look there too.
        for i in 0..9 {
            root.insert(i, Aabb2D::from_xywh(i64::from(i) * 8, 140, 4, 4), &tuning);
        }
        assert!(root.is_split());
        let on_boundary = Aabb2D::new(120, 130, 128, 140);
        root.insert(50, on_boundary, &tuning);
        assert_eq!(root.local_len(), 0);
        assert!(root.remove(&50, &on_boundary, &tuning));
        assert_eq!(root.len(), 9);
    }

    #[test]
    fn small_cells_never_split() {
        let tuning = Tuning::default();
        let mut small: Node<i64, u32> = Node::new(Aabb2D::new(0, 0, 32, 32));
        for i in 0..50 {
            small.insert(i, Aabb2D::from_xywh(i64::from(i % 7), i64::from(i % 5), 2, 2), &tuning);
        }
        assert!(!small.is_split());
        assert_eq!(small.len(), 50);
    }
}
