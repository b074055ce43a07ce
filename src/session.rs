//! Guided session sequencer.
//!
//! Walks the timed steps of a [`GuidedSession`](crate::catalog::GuidedSession)
//! on the host's wall clock. The sequencer owns no audio; it reports step
//! boundaries as events and the player reconfigures the engine in response.
//! Sessions are finite: after the last step the sequencer stops rather than
//! looping.

use crate::catalog::GuidedSession;

/// What happened during a [`SessionSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Playback advanced into the step at this index.
    StepChanged(usize),
    /// The final step completed; the sequencer is now stopped.
    Finished,
}

#[derive(Debug, Clone)]
enum State {
    Stopped,
    PlayingStep {
        index: usize,
        /// Seconds elapsed inside this step.
        elapsed_secs: f64,
    },
}

/// Wall-clock step walker for one guided session.
#[derive(Debug, Clone)]
pub struct SessionSequencer {
    session: GuidedSession,
    state: State,
}

impl SessionSequencer {
    /// Starts at step 0 immediately. A session with no steps begins in the
    /// stopped state and every tick is a no-op.
    pub fn start(session: GuidedSession) -> Self {
        let state = if session.steps.is_empty() {
            State::Stopped
        } else {
            State::PlayingStep {
                index: 0,
                elapsed_secs: 0.0,
            }
        };
        Self { session, state }
    }

    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::PlayingStep { .. })
    }

    /// Index of the step currently playing.
    pub fn current_step_index(&self) -> Option<usize> {
        match self.state {
            State::PlayingStep { index, .. } => Some(index),
            State::Stopped => None,
        }
    }

    /// Seconds elapsed inside the current step.
    pub fn step_elapsed_secs(&self) -> Option<f64> {
        match self.state {
            State::PlayingStep { elapsed_secs, .. } => Some(elapsed_secs),
            State::Stopped => None,
        }
    }

    /// Seconds elapsed across the whole session, including completed steps.
    pub fn total_elapsed_secs(&self) -> f64 {
        match self.state {
            State::Stopped => 0.0,
            State::PlayingStep {
                index,
                elapsed_secs,
            } => {
                let completed: f64 = self.session.steps[..index]
                    .iter()
                    .map(|step| step.duration_secs)
                    .sum();
                completed + elapsed_secs
            }
        }
    }

    pub fn session(&self) -> &GuidedSession {
        &self.session
    }

    /// Advance by `dt_secs`, crossing as many step boundaries as the delta
    /// covers. Overshoot carries into the next step so that a large delta
    /// (a laggy host frame) lands at exactly the right position. Events are
    /// returned in boundary order; `Finished` is always last when present.
    pub fn tick(&mut self, dt_secs: f64) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        let State::PlayingStep {
            mut index,
            mut elapsed_secs,
        } = self.state
        else {
            return events;
        };

        elapsed_secs += dt_secs.max(0.0);
        loop {
            let duration = self.session.steps[index].duration_secs;
            if elapsed_secs < duration {
                break;
            }
            elapsed_secs -= duration;
            index += 1;
            if index == self.session.steps.len() {
                self.state = State::Stopped;
                events.push(SequencerEvent::Finished);
                return events;
            }
            events.push(SequencerEvent::StepChanged(index));
        }

        self.state = State::PlayingStep {
            index,
            elapsed_secs,
        };
        events
    }
}
