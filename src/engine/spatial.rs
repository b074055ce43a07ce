//! Spatial ("8D") panning.

/*
The 8D Sweep
============

"8D audio" is nothing more exotic than a slow auto-pan: a sub-audio LFO
driving the stereo position of the mix, the classic control-rate trick
(tremolo pans amplitude, vibrato pans pitch, 8D pans position).

The panner is ONE free-running sine LFO shared by the layers it applies to,
so the whole image swings together. It is deliberately independent of tone
phase: toggling it on/off, or changing speed/depth, touches only the pan
position and never restarts an oscillator.

Parameter mappings (both 0-100, clamped):

  speed   cycle period, 100 → ~4 s (fast sweep), 0 → ~120 s (near-static).
          Linear in period, not in frequency - the slider feels even that
          way because the ear judges sweeps by period.

  depth   pan excursion, 0 → centered (no audible effect), 100 → full
          left-right sweep (±1).

Per-sample positions are rendered into a shared buffer once per block; the
engine converts positions to channel gains with the unity-at-center
equal-power law (`dsp::pan::sweep_gains`). The product rule that layer 3
never passes through the panner is enforced by the engine's routing, not
here.
*/

use std::f32::consts::TAU;

/// Period at speed 100 (seconds).
const FASTEST_PERIOD_SECS: f32 = 4.0;
/// Period at speed 0 (seconds) - effectively static.
const SLOWEST_PERIOD_SECS: f32 = 120.0;

/// Free-running pan-position LFO.
#[derive(Debug, Clone)]
pub struct SpatialPanner {
    enabled: bool,
    speed: u8,
    depth: u8,
    phase: f32,
}

impl SpatialPanner {
    pub fn new() -> Self {
        Self {
            enabled: false,
            speed: 50,
            depth: 50,
            phase: 0.0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.min(100);
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth.min(100);
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Current cycle period in seconds.
    pub fn period_secs(&self) -> f32 {
        let t = self.speed as f32 / 100.0;
        SLOWEST_PERIOD_SECS + (FASTEST_PERIOD_SECS - SLOWEST_PERIOD_SECS) * t
    }

    /// Fill `out` with pan positions in `[-1, +1]`, advancing the LFO.
    /// When disabled the positions are all centered and the phase holds.
    pub fn render_positions(&mut self, out: &mut [f32], sample_rate: f32) {
        if !self.enabled || self.depth == 0 {
            out.fill(0.0);
            return;
        }

        let excursion = self.depth as f32 / 100.0;
        let increment = 1.0 / (self.period_secs() * sample_rate);
        for position in out.iter_mut() {
            *position = (TAU * self.phase).sin() * excursion;
            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }
}

impl Default for SpatialPanner {
    fn default() -> Self {
        Self::new()
    }
}
