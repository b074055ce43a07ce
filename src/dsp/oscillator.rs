//! Sine oscillator - the single sound source of the tone engine.

/*
Phase-Accumulator Sine
======================

Every tone this engine produces is a sine wave (or a pair of them). Unlike a
general-purpose synthesizer there are no sawtooth/square audio sources here:
entrainment tones want a single clean partial, because extra harmonics blur
the perceived beat.

The oscillator keeps one piece of state, the normalized phase in [0, 1):

    sample  = sin(2π × phase)
    phase  += frequency / sample_rate      (wrapped back into [0, 1))

Why normalized phase instead of accumulating radians? Two reasons:

1. Wrapping is a cheap subtraction, and the accumulator never grows, so
   precision stays constant no matter how long a tone plays. A session can
   legitimately run for an hour.

2. Frequency changes are phase-continuous for free: retuning only changes
   the per-sample increment, never the current phase, so there is no
   discontinuity (no click) at the retune boundary.

Sample n of a freshly reset oscillator is sin(2π f n / sr), which is what the
tests below pin down.
*/

use std::f32::consts::TAU;

/// Sine oscillator with normalized phase in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SineOsc {
    phase: f32,
}

impl SineOsc {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Reset phase to zero (next sample will be 0.0).
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produce one sample and advance the phase.
    ///
    /// `frequency` may change between calls without a discontinuity.
    #[inline]
    pub fn next(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let sample = (TAU * self.phase).sin();
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    /// Fill `out` with oscillator output (overwrites the buffer).
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next(frequency, sample_rate);
        }
    }
}

impl Default for SineOsc {
    fn default() -> Self {
        Self::new()
    }
}
