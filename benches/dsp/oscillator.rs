//! Benchmarks for sine oscillator rendering.

use std::hint::black_box;

use attune::dsp::oscillator::SineOsc;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Carrier-range sine, the workhorse of every tone mode
        let mut osc = SineOsc::new();
        group.bench_with_input(BenchmarkId::new("sine_200hz", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(200.0), black_box(sample_rate));
            })
        });

        // High-frequency sine - same cost, confirms frequency independence
        let mut osc = SineOsc::new();
        group.bench_with_input(BenchmarkId::new("sine_8khz", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer), black_box(8_000.0), black_box(sample_rate));
            })
        });
    }

    group.finish();
}
