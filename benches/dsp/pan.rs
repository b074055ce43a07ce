//! Benchmarks for the equal-power pan law.

use std::hint::black_box;

use attune::dsp::pan::sweep_gains;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pan");

    for &size in BLOCK_SIZES {
        // Positions spread across the full sweep
        let positions: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        group.bench_with_input(BenchmarkId::new("sweep_gains", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = (0.0f32, 0.0f32);
                for &p in &positions {
                    let (l, r) = sweep_gains(black_box(p));
                    acc.0 += l;
                    acc.1 += r;
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
