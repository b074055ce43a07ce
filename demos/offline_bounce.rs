//! Render the engine offline, no audio device required.
//!
//! Run with: cargo run --example offline_bounce

use attune::catalog::{Catalog, PlayableItem, SoundGenerationMode};
use attune::engine::{MixEngine, Slot};

fn main() {
    let sample_rate = 48_000.0;
    let catalog = Catalog::builtin();
    let mut engine = MixEngine::new(sample_rate);

    let alpha = catalog.frequency("alpha").expect("builtin catalog");
    let rain = catalog.frequency("rain").expect("builtin catalog");
    engine.start_playback(
        PlayableItem::Frequency { id: "alpha".into() },
        (alpha, SoundGenerationMode::Binaural),
        Some((rain, SoundGenerationMode::Ambience)),
        None,
    );
    engine.set_8d_enabled(true);
    engine.set_panning_speed(100); // 4 s sweep so it shows inside the bounce
    engine.set_panning_depth(100);

    println!("=== offline bounce ===");
    println!(
        "main oscillators: {:?} Hz",
        engine.oscillator_frequencies(Slot::Main)
    );
    println!("active sources: {}", engine.active_source_count());
    println!();

    let seconds = 8;
    let mut left = vec![0.0f32; sample_rate as usize];
    let mut right = vec![0.0f32; sample_rate as usize];

    println!("sec  peak L  peak R  rms L   rms R   bands (bass/mid/treble)");
    for second in 0..seconds {
        engine.render(&mut left, &mut right);

        let peak = |buf: &[f32]| buf.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        let rms = |buf: &[f32]| {
            (buf.iter().map(|s| s * s).sum::<f32>() / buf.len() as f32).sqrt()
        };
        let [bass, mid, treble] = engine.band_levels();

        println!(
            "{:>3}  {:.4}  {:.4}  {:.4}  {:.4}  {:.2}/{:.2}/{:.2}",
            second,
            peak(&left),
            peak(&right),
            rms(&left),
            rms(&right),
            bass,
            mid,
            treble,
        );
    }

    engine.stop();
    println!();
    println!("stopped, sources remaining: {}", engine.active_source_count());
}
