// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-keyed side table of last-known bounding boxes.

use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::types::Aabb2D;

/// Maps each indexed element to the bounding box the tree currently files it
/// under. Its key set always equals the set of elements reachable from the
/// root; the tree consults it for O(1) membership checks and for the old box
/// during removal and relocation.
pub(crate) struct Registry<T, E> {
    boxes: HashMap<E, Aabb2D<T>>,
}

impl<T: Copy, E: Eq + Hash> Registry<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            boxes: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.boxes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.boxes.clear();
    }

    pub(crate) fn contains(&self, element: &E) -> bool {
        self.boxes.contains_key(element)
    }

    pub(crate) fn get(&self, element: &E) -> Option<Aabb2D<T>> {
        self.boxes.get(element).copied()
    }

    /// Record a new element. Fails if the identity is already present.
    pub(crate) fn record(&mut self, element: E, bbox: Aabb2D<T>) -> bool {
        match self.boxes.entry(element) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(bbox);
                true
            }
        }
    }

    /// Drop an element, returning the box it was filed under.
    pub(crate) fn forget(&mut self, element: &E) -> Option<Aabb2D<T>> {
        self.boxes.remove(element)
    }

    /// Replace the box of an element known to be present.
    pub(crate) fn rewrite(&mut self, element: &E, bbox: Aabb2D<T>) {
        let slot = self
            .boxes
            .get_mut(element)
            .expect("quadtree invariant violated: rewriting an unregistered element");
        *slot = bbox;
    }
}
