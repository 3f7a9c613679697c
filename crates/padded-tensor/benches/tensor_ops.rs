// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use padded_tensor::{add, inner_product, map, Tensor};

fn filled(dims: &[usize]) -> Tensor {
    let n: usize = dims.iter().product();
    let data: Vec<f32> = (0..n).map(|i| (i % 97) as f32 * 0.01).collect();
    Tensor::new(dims.to_vec(), &data).expect("valid benchmark shape")
}

fn bench_inner_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_product");
    // 64 is lane-aligned, 63 and 65 exercise padded rows.
    for n in [63usize, 64, 65] {
        let a = filled(&[4, n, n]);
        let b = filled(&[4, n, n]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| inner_product(black_box(&a), black_box(&b)).unwrap())
        });
    }
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let a = filled(&[256, 250]);
    let b = filled(&[256, 250]);
    c.bench_function("add_256x250", |bench| {
        bench.iter(|| add(black_box(&a), black_box(&b)).unwrap())
    });
}

fn bench_map(c: &mut Criterion) {
    let a = filled(&[64, 64, 10]);
    c.bench_function("map_64x64x10", |bench| {
        bench.iter(|| map(black_box(&a), |x, idx| x + idx[2] as f32).unwrap())
    });
}

criterion_group!(benches, bench_inner_product, bench_add, bench_map);
criterion_main!(benches);
