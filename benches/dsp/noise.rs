//! Benchmarks for the noise sources.

use std::hint::black_box;

use attune::dsp::noise::{NoiseColor, NoiseSource};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        // White - xorshift PRNG only
        let mut white = NoiseSource::new(NoiseColor::White);
        group.bench_with_input(BenchmarkId::new("white", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..size {
                    acc += white.next();
                }
                black_box(acc)
            })
        });

        // Pink - PRNG plus the three-pole filter
        let mut pink = NoiseSource::new(NoiseColor::Pink);
        group.bench_with_input(BenchmarkId::new("pink", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..size {
                    acc += pink.next();
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
