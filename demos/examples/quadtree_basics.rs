// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Index a handful of entities, query a camera viewport, move one entity,
//! and remove another.
//!
//! Run:
//! - `cargo run -p thicket_demos --example quadtree_basics`

use thicket_quadtree::{Aabb2D, Quadtree};

fn main() {
    // A 1280x960 map with a margin, as a map loader would set it up.
    let mut tree: Quadtree<i64, u32> = Quadtree::new(Aabb2D::new(-64, -64, 1344, 1024));
    println!("space: {:?}", tree.space());

    // Index some entities by handle.
    let entities: &[(u32, Aabb2D<i64>)] = &[
        (1, Aabb2D::from_xywh(100, 40, 16, 16)),
        (2, Aabb2D::from_xywh(250, 20, 16, 16)),
        (3, Aabb2D::from_xywh(300, 30, 16, 16)),
        (4, Aabb2D::from_xywh(800, 40, 16, 16)),
        (5, Aabb2D::from_xywh(400, 300, 16, 16)),
    ];
    for (id, bbox) in entities.iter().copied() {
        assert!(tree.add(id, bbox));
    }
    println!("indexed {} entities: {:?}", tree.len(), tree);

    // Which entities does a 320x240 camera see?
    let camera = Aabb2D::from_xywh(220, 0, 320, 240);
    let mut visible: Vec<u32> = tree.query_rect(camera).collect();
    visible.sort_unstable();
    println!("camera {:?} sees {:?}", camera, visible);
    assert_eq!(visible, [2, 3]);

    // Entity 5 walks into the viewport.
    tree.update(&5, Aabb2D::from_xywh(400, 100, 16, 16));
    let mut visible: Vec<u32> = tree.query_rect(camera).collect();
    visible.sort_unstable();
    println!("after the move it sees {:?}", visible);
    assert_eq!(visible, [2, 3, 5]);

    // Entity 4 despawns.
    assert!(tree.remove(&4));
    assert!(!tree.contains(&4));
    println!("{} entities left", tree.len());
}
