//! Master analyser - frequency-domain view of the summed output.
//!
//! FFT of the most recent mixed samples, exposed as byte magnitudes for the
//! visualizer. The analyser is the one piece of engine state that outlives
//! `stop()`: when nothing is audible it decays the previous frame toward
//! silence instead of cutting to zero, which is what makes the visualizer
//! fade gracefully.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT size. 1024 at 48 kHz is ~47 Hz per bin - plenty for a decorative
/// three-band readout.
pub const ANALYSER_SIZE: usize = 1024;
/// Usable half of the FFT output.
pub const FREQUENCY_BINS: usize = ANALYSER_SIZE / 2;

/// dB floor mapped to byte 0.
const MIN_DB: f32 = -100.0;
/// dB ceiling mapped to byte 255.
const MAX_DB: f32 = -30.0;
/// Temporal smoothing toward the new frame (old frame keeps 0.8).
const SMOOTHING: f32 = 0.8;
/// Per-frame multiplicative decay when nothing is audible.
const IDLE_DECAY: f32 = 0.97;

pub struct Analyser {
    /// Hann window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Rolling buffer of the latest mono samples
    input: Vec<f32>,
    /// Smoothed byte magnitudes, 0-255 per bin
    bytes: Vec<f32>,
}

impl Analyser {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(ANALYSER_SIZE);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..ANALYSER_SIZE)
            .map(|i| {
                let denom = (ANALYSER_SIZE - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
            })
            .collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); ANALYSER_SIZE],
            input: vec![0.0; ANALYSER_SIZE],
            bytes: vec![0.0; FREQUENCY_BINS],
        }
    }

    /// Append mixed mono samples, keeping the latest `ANALYSER_SIZE`.
    pub fn write(&mut self, samples: &[f32]) {
        if samples.len() >= ANALYSER_SIZE {
            self.input
                .copy_from_slice(&samples[samples.len() - ANALYSER_SIZE..]);
            return;
        }
        self.input.rotate_left(samples.len());
        let start = ANALYSER_SIZE - samples.len();
        self.input[start..].copy_from_slice(samples);
    }

    /// Advance one visual frame. `audible` selects between a fresh FFT of
    /// the rolling buffer and the idle decay.
    pub fn process(&mut self, audible: bool) {
        if !audible {
            for byte in self.bytes.iter_mut() {
                *byte *= IDLE_DECAY;
                if *byte < 1.0 {
                    *byte = 0.0;
                }
            }
            return;
        }

        for (i, sample) in self.input.iter().enumerate() {
            self.scratch[i].re = *sample * self.window[i];
            self.scratch[i].im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for (i, byte) in self.bytes.iter_mut().enumerate() {
            let bin = self.scratch[i];
            // Normalize by window length before the dB conversion
            let magnitude =
                (bin.re * bin.re + bin.im * bin.im).sqrt() / (ANALYSER_SIZE as f32 / 2.0);
            let db = 20.0 * magnitude.max(1e-10).log10();
            let normalized = ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0);
            let fresh = normalized * 255.0;
            *byte = *byte * SMOOTHING + fresh * (1.0 - SMOOTHING);
        }
    }

    /// Byte magnitudes per bin, 0-255.
    pub fn frequency_data(&self, out: &mut [u8]) {
        for (dst, src) in out.iter_mut().zip(self.bytes.iter()) {
            *dst = *src as u8;
        }
    }

    /// Bass/mid/treble intensities in 0-1: first ~10% of the bins, next
    /// ~30%, remaining ~60%.
    pub fn band_levels(&self) -> [f32; 3] {
        let bass_end = FREQUENCY_BINS / 10;
        let mid_end = bass_end + (FREQUENCY_BINS * 3) / 10;

        let average = |range: &[f32]| -> f32 {
            if range.is_empty() {
                return 0.0;
            }
            range.iter().sum::<f32>() / (range.len() as f32 * 255.0)
        };

        [
            average(&self.bytes[..bass_end]),
            average(&self.bytes[bass_end..mid_end]),
            average(&self.bytes[mid_end..]),
        ]
    }
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}
