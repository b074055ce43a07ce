//! Isochronic amplitude gate.

/*
Isochronic Gating
=================

An isochronic tone is a single carrier whose amplitude is switched on and off
at the beat rate. Unlike a binaural pair it needs no stereo separation, so it
works on speakers.

A naive square gate clicks: the instant transitions put energy across the
whole spectrum. The classic fix is to round the edges with a raised-cosine
ramp, which is what this gate does.

One period (normalized phase 0..1, edge fraction e):

    value
      1.0        ┌─────────┐
                ╱           ╲
      0.0 ─────╱             ╲──────────
           0   e      0.5   0.5+e    1.0
              rise    fall starts

    rise  [0, e):        0.5 × (1 - cos(π t / e))
    high  [e, 0.5):      1.0
    fall  [0.5, 0.5+e):  0.5 × (1 + cos(π (t - 0.5) / e))
    low   [0.5+e, 1):    0.0

Duty cycle is fixed at 50% - the audible "on" time equals the silent time,
which is the standard presentation for entrainment tones. The edge fraction
is 10% of the period, long enough to kill clicks at any beat rate the
catalog uses (0.5 - 40 Hz) and short enough to keep the pulse distinct.

The gate keeps its own phase. Pausing playback simply stops evaluating it,
so the pulse resumes where it left off.
*/

/// Fraction of the period spent in each raised-cosine edge.
const EDGE_FRACTION: f32 = 0.1;

/// Unipolar pulse train with raised-cosine edges, 50% duty cycle.
#[derive(Debug, Clone)]
pub struct IsochronicGate {
    phase: f32,
}

impl IsochronicGate {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Gate value for a normalized phase in `[0, 1)`.
    #[inline]
    pub fn shape(phase: f32) -> f32 {
        use std::f32::consts::PI;

        if phase < EDGE_FRACTION {
            0.5 * (1.0 - (PI * phase / EDGE_FRACTION).cos())
        } else if phase < 0.5 {
            1.0
        } else if phase < 0.5 + EDGE_FRACTION {
            0.5 * (1.0 + (PI * (phase - 0.5) / EDGE_FRACTION).cos())
        } else {
            0.0
        }
    }

    /// Produce one gate sample and advance the phase.
    #[inline]
    pub fn next(&mut self, beat_hz: f32, sample_rate: f32) -> f32 {
        let value = Self::shape(self.phase);
        self.phase += beat_hz / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }
}

impl Default for IsochronicGate {
    fn default() -> Self {
        Self::new()
    }
}
