//! Walk a guided session on a simulated clock and print every transition.
//!
//! Run with: cargo run --example session_script

use std::sync::Arc;

use attune::catalog::Catalog;
use attune::engine::Slot;
use attune::player::Player;

fn main() {
    let catalog = Arc::new(Catalog::builtin());
    let mut player = Player::new(Arc::clone(&catalog), 48_000.0);

    let session = catalog.session("deep-focus").expect("builtin catalog");
    println!("=== {} ===", session.name);
    for (i, step) in session.steps.iter().enumerate() {
        println!(
            "  step {}: {} ({} s) - main {}, layer2 {}",
            i + 1,
            step.title,
            step.duration_secs,
            step.main,
            step.layer2.as_deref().unwrap_or("-"),
        );
    }
    println!();

    player.play_session("deep-focus");

    // Simulated wall clock, one-second ticks.
    let mut last_step = usize::MAX;
    let total = session.total_duration_secs() as u64 + 1;
    for second in 0..=total {
        if let Some(view) = player.snapshot().session {
            if view.step_index != last_step {
                last_step = view.step_index;
                println!(
                    "[{:>4}s] -> step {}: {}  (oscillators {:?} Hz)",
                    second,
                    view.step_index + 1,
                    view.step_title,
                    player.engine().oscillator_frequencies(Slot::Main),
                );
            }
        } else if player.snapshot().item_id.is_none() && second > 0 {
            println!("[{second:>4}s] session complete, engine stopped");
            break;
        }

        player.tick(1.0);
        // Step retunes settle through the render path.
        let mut l = vec![0.0f32; 2048];
        let mut r = vec![0.0f32; 2048];
        player.render(&mut l, &mut r);
    }
}
