//! Linear gain ramp for click-free parameter moves.

/*
Why Every Gain Goes Through A Ramp
==================================

Jumping a gain from one value to another mid-signal creates a step in the
output waveform - a click. The engine never applies gains directly; every
audible gain (per-layer volume, the master pause/resume gain, the retune
fade) moves through one of these smoothers.

The smoother is a linear ramp with a precomputed per-sample step:

    step = (target - current) / (ramp_seconds × sample_rate)

Each sample, `current` moves one step toward `target` and clamps there on
arrival. A linear ramp (rather than a one-pole exponential) reaches its
target in a known, finite time, which matters here: the retune sequence
waits for the ramp to *settle at zero* before swapping sources, and an
exponential never quite arrives.

Typical ramp times in this engine:
    retune fade        30 ms   (inaudible, well above the click threshold)
    volume change      50 ms
    pause/resume       30 ms
*/

use crate::MIN_TIME;

/// Linear ramp toward a target value.
#[derive(Debug, Clone)]
pub struct Smoother {
    current: f32,
    target: f32,
    step: f32,
}

impl Smoother {
    /// Create a smoother already settled at `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
        }
    }

    /// Begin ramping toward `target` over `ramp_seconds`.
    pub fn ramp_to(&mut self, target: f32, ramp_seconds: f32, sample_rate: f32) {
        self.target = target;
        let samples = (ramp_seconds.max(MIN_TIME) * sample_rate).max(1.0);
        self.step = (target - self.current) / samples;
    }

    /// Jump straight to `value` with no ramp. Only safe when the signal is
    /// already silent (initial setup, teardown of a settled-at-zero layer).
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        if self.current != self.target {
            self.current += self.step;
            // Clamp on overshoot in either direction
            if (self.step > 0.0 && self.current >= self.target)
                || (self.step < 0.0 && self.current <= self.target)
            {
                self.current = self.target;
                self.step = 0.0;
            }
        }
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the ramp has reached its target.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}
