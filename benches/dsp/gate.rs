//! Benchmarks for the isochronic amplitude gate.

use std::hint::black_box;

use attune::dsp::gate::IsochronicGate;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/gate");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut gate = IsochronicGate::new();
        group.bench_with_input(BenchmarkId::new("10hz", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..size {
                    acc += gate.next(black_box(10.0), black_box(sample_rate));
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
