//! Breathing pacer.
//!
//! An infinite phase cycle over a [`BreathingPattern`](crate::catalog::BreathingPattern),
//! fully independent of audio playback: it keeps cycling whether sound is
//! playing, paused, or stopped, until explicitly stopped. The UI reads the
//! current phase name, a 0-1 progress value for the animation, and a
//! whole-second countdown.

use crate::catalog::{BreathPhase, BreathingPattern};

#[derive(Debug, Clone)]
enum State {
    Inactive,
    Running {
        phase_index: usize,
        /// Seconds elapsed inside this phase.
        elapsed_secs: f64,
    },
}

#[derive(Debug, Clone)]
pub struct BreathingPacer {
    pattern: BreathingPattern,
    state: State,
}

impl BreathingPacer {
    /// An idle pacer for `pattern`. Call [`start`](Self::start) to begin.
    pub fn new(pattern: BreathingPattern) -> Self {
        Self {
            pattern,
            state: State::Inactive,
        }
    }

    /// Begin (or restart) the cycle from the first phase. A pattern with no
    /// phases, or with a zero-length cycle, cannot run.
    pub fn start(&mut self) {
        if self.pattern.phases.is_empty() || self.pattern.cycle_secs() <= 0.0 {
            return;
        }
        self.state = State::Running {
            phase_index: 0,
            elapsed_secs: 0.0,
        };
    }

    pub fn stop(&mut self) {
        self.state = State::Inactive;
    }

    /// Swap patterns. A running pacer restarts on the new pattern's first
    /// phase so the animation never points into a phase that no longer
    /// exists.
    pub fn set_pattern(&mut self, pattern: BreathingPattern) {
        let was_running = self.is_running();
        self.pattern = pattern;
        self.state = State::Inactive;
        if was_running {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    pub fn current_phase(&self) -> Option<&BreathPhase> {
        match self.state {
            State::Running { phase_index, .. } => Some(&self.pattern.phases[phase_index]),
            State::Inactive => None,
        }
    }

    /// Seconds elapsed inside the current phase.
    pub fn phase_elapsed_secs(&self) -> Option<f64> {
        match self.state {
            State::Running { elapsed_secs, .. } => Some(elapsed_secs),
            State::Inactive => None,
        }
    }

    /// 0-1 position within the current phase, for the animation.
    pub fn phase_progress(&self) -> Option<f64> {
        let phase = self.current_phase()?;
        let elapsed = self.phase_elapsed_secs()?;
        if phase.duration_secs <= 0.0 {
            return Some(1.0);
        }
        Some((elapsed / phase.duration_secs).clamp(0.0, 1.0))
    }

    /// Whole seconds remaining in the current phase, rounded up so the
    /// display never shows 0 while the phase is still in progress.
    pub fn phase_countdown_secs(&self) -> Option<u64> {
        let phase = self.current_phase()?;
        let elapsed = self.phase_elapsed_secs()?;
        Some((phase.duration_secs - elapsed).max(0.0).ceil() as u64)
    }

    /// Advance by `dt_secs`, wrapping from the last phase back to the first
    /// indefinitely. Overshoot carries across phase boundaries.
    pub fn tick(&mut self, dt_secs: f64) {
        let State::Running {
            mut phase_index,
            mut elapsed_secs,
        } = self.state
        else {
            return;
        };

        elapsed_secs += dt_secs.max(0.0);
        loop {
            let duration = self.pattern.phases[phase_index].duration_secs;
            if elapsed_secs < duration {
                break;
            }
            elapsed_secs -= duration;
            phase_index = (phase_index + 1) % self.pattern.phases.len();
        }

        self.state = State::Running {
            phase_index,
            elapsed_secs,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(phases: &[(&str, f64)]) -> BreathingPattern {
        BreathingPattern {
            id: "test".into(),
            name: "Test".into(),
            phases: phases
                .iter()
                .map(|(name, secs)| BreathPhase {
                    name: name.to_string(),
                    duration_secs: *secs,
                })
                .collect(),
        }
    }

    fn triangle() -> BreathingPattern {
        pattern(&[("inhale", 4.0), ("hold", 2.0), ("exhale", 4.0)])
    }

    #[test]
    fn starts_on_the_first_phase() {
        let mut pacer = BreathingPacer::new(triangle());
        assert!(!pacer.is_running());
        pacer.start();
        assert_eq!(pacer.current_phase().unwrap().name, "inhale");
        assert_eq!(pacer.phase_elapsed_secs(), Some(0.0));
    }

    #[test]
    fn cycle_wraps_back_to_the_first_phase() {
        // 11 s into a 10 s cycle of [4, 2, 4]: inhale again, 1 s in.
        let mut pacer = BreathingPacer::new(triangle());
        pacer.start();
        pacer.tick(11.0);
        assert_eq!(pacer.current_phase().unwrap().name, "inhale");
        assert!((pacer.phase_elapsed_secs().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn runs_for_many_cycles_without_drift() {
        let mut pacer = BreathingPacer::new(triangle());
        pacer.start();
        // 1000 cycles plus 5 s, in uneven increments.
        let total = 10_000.0 + 5.0;
        let mut remaining: f64 = total;
        while remaining > 0.0 {
            let dt = remaining.min(0.73);
            pacer.tick(dt);
            remaining -= dt;
        }
        // 5 s into the cycle: hold phase, 1 s in.
        assert_eq!(pacer.current_phase().unwrap().name, "hold");
        assert!((pacer.phase_elapsed_secs().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn progress_and_countdown_track_the_phase() {
        let mut pacer = BreathingPacer::new(triangle());
        pacer.start();
        pacer.tick(1.0);
        assert!((pacer.phase_progress().unwrap() - 0.25).abs() < 1e-9);
        assert_eq!(pacer.phase_countdown_secs(), Some(3));

        pacer.tick(2.5);
        // 3.5 s into a 4 s inhale: 0.5 s left, shown as 1.
        assert_eq!(pacer.phase_countdown_secs(), Some(1));
    }

    #[test]
    fn stop_clears_the_phase() {
        let mut pacer = BreathingPacer::new(triangle());
        pacer.start();
        pacer.tick(3.0);
        pacer.stop();
        assert!(!pacer.is_running());
        assert_eq!(pacer.current_phase(), None);
        pacer.tick(3.0);
        assert!(!pacer.is_running());
    }

    #[test]
    fn pattern_swap_restarts_a_running_pacer() {
        let mut pacer = BreathingPacer::new(triangle());
        pacer.start();
        pacer.tick(5.0);
        pacer.set_pattern(pattern(&[("in", 7.0), ("out", 7.0)]));
        assert!(pacer.is_running());
        assert_eq!(pacer.current_phase().unwrap().name, "in");
        assert_eq!(pacer.phase_elapsed_secs(), Some(0.0));
    }

    #[test]
    fn empty_pattern_never_starts() {
        let mut pacer = BreathingPacer::new(pattern(&[]));
        pacer.start();
        assert!(!pacer.is_running());
    }
}
