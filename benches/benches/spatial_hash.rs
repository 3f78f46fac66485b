// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial hash broad-phase benchmarks.

#![allow(missing_docs, reason = "criterion macros generate undocumented items")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use understory_spatial_hash::{Aabb2D, ShapeId, SpatialHash};

const WORLD: f32 = 2048.0;
const CELL: f32 = 32.0;

/// Deterministic scatter of `n` boxes, 8–24 units wide.
fn scatter(n: usize, phase: u32) -> Vec<Aabb2D<f32>> {
    let mut state = 0x9e37_79b9_u32 ^ phase;
    let mut next = move || {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state >> 8) as f32 / (1_u32 << 24) as f32
    };
    (0..n)
        .map(|_| {
            let x = next() * (WORLD - CELL);
            let y = next() * (WORLD - CELL);
            let w = 8.0 + next() * 16.0;
            let h = 8.0 + next() * 16.0;
            Aabb2D::from_xywh(x, y, w, h)
        })
        .collect()
}

fn populated(boxes: &[Aabb2D<f32>]) -> (SpatialHash<f32>, Vec<ShapeId>) {
    let mut hash = SpatialHash::new(WORLD, WORLD, CELL).unwrap();
    let ids = boxes.iter().map(|b| hash.insert(b).unwrap()).collect();
    (hash, ids)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_hash/insert");
    for n in [1_000_usize, 10_000] {
        let boxes = scatter(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &boxes, |b, boxes| {
            b.iter(|| black_box(populated(boxes)));
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_hash/update");
    for n in [1_000_usize, 10_000] {
        let from = scatter(n, 1);
        let to = scatter(n, 2);
        let (mut hash, ids) = populated(&from);
        let mut flip = false;
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let target = if flip { &from } else { &to };
                flip = !flip;
                for (id, aabb) in ids.iter().zip(target) {
                    hash.update(*id, aabb).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_hash/all_colliding_pairs");
    for n in [1_000_usize, 10_000] {
        let (hash, _) = populated(&scatter(n, 3));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(hash.all_colliding_pairs()));
        });
    }
    group.finish();
}

fn bench_colliding_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_hash/colliding_with");
    for n in [1_000_usize, 10_000] {
        let (hash, ids) = populated(&scatter(n, 4));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                let mut total = 0;
                for id in &ids {
                    total += hash.visit_colliding_with(*id, |hit| {
                        black_box(hit);
                    });
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_update,
    bench_pairs,
    bench_colliding_with
);
criterion_main!(benches);
