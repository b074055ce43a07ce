//! Benchmarks for the full mix engine render path.
//!
//! These simulate the audio callback's workload: one to three layers,
//! optionally with the spatial sweep, summed through the master chain and
//! analysed.

use std::hint::black_box;

use attune::catalog::{Catalog, PlayableItem, SoundGenerationMode};
use attune::engine::MixEngine;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

fn single_layer_engine(catalog: &Catalog) -> MixEngine {
    let mut engine = MixEngine::new(48_000.0);
    let alpha = catalog.frequency("alpha").unwrap();
    engine.start_playback(
        PlayableItem::Frequency { id: "alpha".into() },
        (alpha, SoundGenerationMode::Binaural),
        None,
        None,
    );
    engine
}

fn full_stack_engine(catalog: &Catalog) -> MixEngine {
    let mut engine = MixEngine::new(48_000.0);
    let alpha = catalog.frequency("alpha").unwrap();
    let rain = catalog.frequency("rain").unwrap();
    let tone = catalog.frequency("432hz").unwrap();
    engine.start_playback(
        PlayableItem::Frequency { id: "alpha".into() },
        (alpha, SoundGenerationMode::Binaural),
        Some((rain, SoundGenerationMode::Ambience)),
        Some((tone, SoundGenerationMode::Pure)),
    );
    engine.set_8d_enabled(true);
    engine.set_panning_speed(80);
    engine.set_panning_depth(100);
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let catalog = Catalog::builtin();

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        // === MINIMAL: one binaural layer ===
        let mut minimal = single_layer_engine(&catalog);
        group.bench_with_input(BenchmarkId::new("1_layer_binaural", size), &size, |b, _| {
            b.iter(|| {
                minimal.render(black_box(&mut left), black_box(&mut right));
            })
        });

        // === FULL: three layers with the spatial sweep enabled ===
        let mut full = full_stack_engine(&catalog);
        group.bench_with_input(BenchmarkId::new("3_layer_spatial", size), &size, |b, _| {
            b.iter(|| {
                full.render(black_box(&mut left), black_box(&mut right));
            })
        });
    }

    group.finish();
}
