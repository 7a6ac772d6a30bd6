// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_quadtree::{Aabb2D, Quadtree};

const WORLD: i64 = 4096;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_in(&mut self, bound: i64) -> i64 {
        (self.next_u64() % bound as u64) as i64
    }
}

fn gen_scattered_boxes(count: usize, max_size: i64, seed: u64) -> Vec<Aabb2D<i64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(seed);
    for _ in 0..count {
        let w = 1 + rng.next_in(max_size);
        let h = 1 + rng.next_in(max_size);
        let x = rng.next_in(WORLD - w);
        let y = rng.next_in(WORLD - h);
        out.push(Aabb2D::from_xywh(x, y, w, h));
    }
    out
}

fn populated_tree(boxes: &[Aabb2D<i64>]) -> Quadtree<i64, u32> {
    let mut tree = Quadtree::new(Aabb2D::new(0, 0, WORLD, WORLD));
    for (i, bbox) in boxes.iter().copied().enumerate() {
        let _ = tree.add(i as u32, bbox);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[256_usize, 1024, 4096] {
        let boxes = gen_scattered_boxes(n, 32, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("add_n{}", n), |b| {
            b.iter_batched(
                || Quadtree::<i64, u32>::new(Aabb2D::new(0, 0, WORLD, WORLD)),
                |mut tree| {
                    for (i, bbox) in boxes.iter().copied().enumerate() {
                        let _ = tree.add(i as u32, bbox);
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for &n in &[1024_usize, 4096] {
        let boxes = gen_scattered_boxes(n, 32, 0xBADC_F00D_1234_5678);
        let tree = populated_tree(&boxes);
        let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
        let regions: Vec<Aabb2D<i64>> = (0..256)
            .map(|_| {
                let x = rng.next_in(WORLD - 256);
                let y = rng.next_in(WORLD - 256);
                Aabb2D::from_xywh(x, y, 256, 256)
            })
            .collect();
        group.throughput(Throughput::Elements(regions.len() as u64));
        group.bench_function(format!("viewport_256_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for region in &regions {
                    tree.visit_rect(*region, |_, _| hits += 1);
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_move_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_churn");
    let n = 1024_usize;
    let boxes = gen_scattered_boxes(n, 32, 0xC1A5_7E55_9999_ABCD);
    group.throughput(Throughput::Elements(n as u64));

    // Small nudges: the common per-frame case that stays inside one cell.
    group.bench_function("nudge_all", |b| {
        b.iter_batched(
            || populated_tree(&boxes),
            |mut tree| {
                for (i, bbox) in boxes.iter().enumerate() {
                    let moved = Aabb2D::new(
                        bbox.min_x + 1,
                        bbox.min_y + 1,
                        bbox.max_x + 1,
                        bbox.max_y + 1,
                    );
                    let _ = tree.update(&(i as u32), moved);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });

    // Teleports: every move re-files the element from the root.
    group.bench_function("teleport_all", |b| {
        b.iter_batched(
            || {
                let targets = gen_scattered_boxes(n, 32, 0x0DDB_A11_5EED_7777);
                (populated_tree(&boxes), targets)
            },
            |(mut tree, targets)| {
                for (i, bbox) in targets.iter().copied().enumerate() {
                    let _ = tree.update(&(i as u32), bbox);
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let n = 1024_usize;
    let boxes = gen_scattered_boxes(n, 32, 0x5EED_0F0F_3333_AAAA);
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("drain_all", |b| {
        b.iter_batched(
            || populated_tree(&boxes),
            |mut tree| {
                for i in 0..n {
                    let _ = tree.remove(&(i as u32));
                }
                black_box(tree.is_empty());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query,
    bench_move_churn,
    bench_remove
);
criterion_main!(benches);
