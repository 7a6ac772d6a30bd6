// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watch cells split and merge.
//!
//! Fill one corner of the world until the tree subdivides, then drain it
//! and watch the structure collapse back to a single cell. The `Debug`
//! output reports node count and depth.
//!
//! Run:
//! - `cargo run -p thicket_demos --example quadtree_split_merge`

use thicket_quadtree::{Aabb2D, Quadtree};

fn main() {
    let mut tree: Quadtree<i64, u32> = Quadtree::new(Aabb2D::new(0, 0, 256, 256));

    // Crowd the north-west corner; each overflow subdivides further.
    for i in 0..24_i64 {
        let x = (i % 6) * 10;
        let y = (i / 6) * 10;
        tree.add(i as u32, Aabb2D::from_xywh(x, y, 6, 6));
        println!("after add #{:2}: {:?}", i + 1, tree);
    }

    // A box sitting on the center of the world fits no quadrant and is
    // served straight from the root.
    tree.add(100, Aabb2D::new(120, 120, 136, 136));
    let across: Vec<u32> = tree.query_rect(Aabb2D::new(120, 120, 136, 136)).collect();
    println!("straddler query: {across:?}");

    // Drain the corner again; sparse subtrees merge away.
    for i in 0..24_u32 {
        tree.remove(&i);
        if i % 6 == 5 {
            println!("after remove #{:2}: {:?}", i + 1, tree);
        }
    }
    println!("finally: {:?}", tree);
}
