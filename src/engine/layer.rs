//! Tone layers - one slot of the three-layer mix.

/*
Layer Lifecycle
===============

A layer slot is either `Inactive` or `Active`. An active layer owns its
signal sources exclusively; destroying the layer drops them deterministically
and is idempotent (destroying an inactive slot is a no-op, not an error).

Invalid combinations are unrepresentable by construction: there is no
"active flag plus nullable frequency" - an `Active` layer always holds a
resolved frequency and a buildable source set. `Layer::create` returns
`None` (slot stays `Inactive`, no sources made) when the configuration
cannot produce a signal:

    - Pure / Binaural / Isochronic with base_hz <= 0
    - Binaural / Isochronic without a positive beat frequency

Three gain moves keep the layer click-free, all through the same smoother:

  CREATE    gain fades 0 → target over 30 ms, so a new source never starts
            with a step.

  RETUNE    the new configuration is parked in `pending`; gain ramps to
            zero, and only once it has *settled* at zero are the sources
            swapped and the gain ramped back. The listener hears a 60 ms
            dip, never a click, and never both configurations at once.

  RELEASE   gain ramps to zero; when settled the engine destroys the slot.
            Used for live layer removal so the main layer is untouched.
            A retune arriving mid-release captures the slot back: the
            fade-out continues and the new configuration swaps in at zero,
            so toggling a layer off and straight back on never hard-cuts.

Volume is 0-100 and maps through a squared perceptual curve - linear sliders
feel "dead" at the top otherwise because amplitude and loudness are not the
same scale.
*/

use crate::catalog::{Frequency, SoundGenerationMode};
use crate::dsp::gate::IsochronicGate;
use crate::dsp::noise::{NoiseColor, NoiseSource};
use crate::dsp::oscillator::SineOsc;
use crate::dsp::smoother::Smoother;

/// Fade time for create/retune/release moves.
pub(crate) const LAYER_RAMP_SECS: f32 = 0.03;
/// Fade time for volume changes.
const VOLUME_RAMP_SECS: f32 = 0.05;
/// Ambience beds sit a little under the tones by default.
const AMBIENCE_TRIM: f32 = 0.8;

/// Perceptual volume curve: slider 0-100 → amplitude 0-1.
#[inline]
pub(crate) fn volume_curve(volume: u8) -> f32 {
    let v = volume.min(100) as f32 / 100.0;
    v * v
}

/// Mode-specific signal sources, owned exclusively by one layer.
#[derive(Debug, Clone)]
enum Sources {
    Pure {
        osc: SineOsc,
        base_hz: f32,
    },
    Binaural {
        left: SineOsc,
        right: SineOsc,
        base_hz: f32,
        beat_hz: f32,
    },
    Isochronic {
        osc: SineOsc,
        gate: IsochronicGate,
        base_hz: f32,
        beat_hz: f32,
    },
    Ambience {
        noise: NoiseSource,
    },
}

impl Sources {
    /// Build the source set for a frequency/mode pair, or `None` when the
    /// configuration cannot produce a signal.
    fn build(frequency: &Frequency, mode: SoundGenerationMode) -> Option<Self> {
        match mode {
            SoundGenerationMode::Pure => {
                if frequency.base_hz <= 0.0 {
                    return None;
                }
                Some(Self::Pure {
                    osc: SineOsc::new(),
                    base_hz: frequency.base_hz,
                })
            }
            SoundGenerationMode::Binaural => {
                let beat_hz = frequency.binaural_hz.filter(|b| *b > 0.0)?;
                if frequency.base_hz <= 0.0 {
                    return None;
                }
                Some(Self::Binaural {
                    left: SineOsc::new(),
                    right: SineOsc::new(),
                    base_hz: frequency.base_hz,
                    beat_hz,
                })
            }
            SoundGenerationMode::Isochronic => {
                let beat_hz = frequency.binaural_hz.filter(|b| *b > 0.0)?;
                if frequency.base_hz <= 0.0 {
                    return None;
                }
                Some(Self::Isochronic {
                    osc: SineOsc::new(),
                    gate: IsochronicGate::new(),
                    base_hz: frequency.base_hz,
                    beat_hz,
                })
            }
            SoundGenerationMode::Ambience => Some(Self::Ambience {
                noise: NoiseSource::new(NoiseColor::Pink),
            }),
        }
    }

    /// Number of live signal sources (the gate is a modulator, not a source).
    fn source_count(&self) -> usize {
        match self {
            Self::Binaural { .. } => 2,
            _ => 1,
        }
    }

    /// Oscillator frequencies in Hz, left-to-right for binaural pairs.
    fn oscillator_frequencies(&self) -> Vec<f32> {
        match self {
            Self::Pure { base_hz, .. } => vec![*base_hz],
            Self::Binaural { base_hz, beat_hz, .. } => {
                vec![base_hz - beat_hz / 2.0, base_hz + beat_hz / 2.0]
            }
            Self::Isochronic { base_hz, .. } => vec![*base_hz],
            Self::Ambience { .. } => Vec::new(),
        }
    }
}

/// A tone layer in flight.
#[derive(Debug, Clone)]
pub struct ActiveLayer {
    frequency: Frequency,
    mode: SoundGenerationMode,
    volume: u8,
    gain: Smoother,
    sources: Sources,
    /// Configuration waiting for the gain to settle at zero.
    pending: Option<(Frequency, SoundGenerationMode)>,
    releasing: bool,
    serial: u64,
}

/// True if a frequency/mode pair can produce a signal at all. Used by the
/// engine to validate a main layer before tearing anything down.
pub fn config_is_playable(frequency: &Frequency, mode: SoundGenerationMode) -> bool {
    Sources::build(frequency, mode).is_some()
}

/// One mix slot: inactive, or an active layer.
#[derive(Debug, Clone, Default)]
pub enum Layer {
    #[default]
    Inactive,
    Active(ActiveLayer),
}

impl Layer {
    /// Create a layer, fading in from silence. Returns `Inactive`-preserving
    /// `None` when the frequency/mode pair is unplayable.
    pub fn create(
        frequency: &Frequency,
        mode: SoundGenerationMode,
        volume: u8,
        sample_rate: f32,
        serial: u64,
    ) -> Option<Self> {
        let sources = Sources::build(frequency, mode)?;
        let mut gain = Smoother::new(0.0);
        gain.ramp_to(volume_curve(volume), LAYER_RAMP_SECS, sample_rate);
        Some(Self::Active(ActiveLayer {
            frequency: frequency.clone(),
            mode,
            volume: volume.min(100),
            gain,
            sources,
            pending: None,
            releasing: false,
            serial,
        }))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(layer) if !layer.releasing)
    }

    /// Re-parameterize without an audible click: fade to zero, swap sources
    /// once settled, fade back. A mid-release layer is captured back into
    /// service: its fade-out keeps going and the new sources take over once
    /// it settles, so the old signal is never cut at non-zero gain. No-op
    /// (returns false) for an unplayable target configuration or an
    /// inactive slot.
    pub fn retune(
        &mut self,
        frequency: &Frequency,
        mode: SoundGenerationMode,
        sample_rate: f32,
    ) -> bool {
        let Self::Active(layer) = self else {
            return false;
        };
        if Sources::build(frequency, mode).is_none() {
            return false;
        }
        layer.releasing = false;
        layer.pending = Some((frequency.clone(), mode));
        layer.gain.ramp_to(0.0, LAYER_RAMP_SECS, sample_rate);
        true
    }

    /// Clamped 0-100, effective immediately (through the volume ramp).
    pub fn set_volume(&mut self, volume: u8, sample_rate: f32) {
        if let Self::Active(layer) = self {
            layer.volume = volume.min(100);
            // Mid-retune the fade-to-zero wins; the new volume applies on
            // the way back up.
            if !layer.releasing && layer.pending.is_none() {
                layer
                    .gain
                    .ramp_to(volume_curve(layer.volume), VOLUME_RAMP_SECS, sample_rate);
            }
        }
    }

    pub fn volume(&self) -> u8 {
        match self {
            Self::Active(layer) => layer.volume,
            Self::Inactive => 0,
        }
    }

    /// Begin fading out; the slot reports inactive immediately and the
    /// engine destroys it once the fade settles.
    pub fn begin_release(&mut self, sample_rate: f32) {
        if let Self::Active(layer) = self {
            layer.releasing = true;
            layer.pending = None;
            layer.gain.ramp_to(0.0, LAYER_RAMP_SECS, sample_rate);
        }
    }

    /// Drop all sources now. Idempotent; returns the source serial if a
    /// teardown actually happened.
    pub fn destroy(&mut self) -> Option<u64> {
        match std::mem::take(self) {
            Self::Active(layer) => Some(layer.serial),
            Self::Inactive => None,
        }
    }

    /// True once a release fade has fully settled at silence.
    pub fn release_finished(&self) -> bool {
        matches!(
            self,
            Self::Active(layer)
                if layer.releasing && layer.gain.is_settled() && layer.gain.current() == 0.0
        )
    }

    /// Complete a pending retune if the fade-out has settled. Returns the
    /// old source serial when a swap happened; the new sources take
    /// `new_serial`.
    pub fn try_swap_pending(&mut self, new_serial: u64, sample_rate: f32) -> Option<u64> {
        let Self::Active(layer) = self else {
            return None;
        };
        if layer.pending.is_none() || !layer.gain.is_settled() || layer.gain.current() != 0.0 {
            return None;
        }
        let (frequency, mode) = layer.pending.take()?;
        // Validated at retune() time; a failure here would mean the catalog
        // entry mutated, which it cannot.
        let sources = Sources::build(&frequency, mode)?;
        let old_serial = layer.serial;
        layer.frequency = frequency;
        layer.mode = mode;
        layer.sources = sources;
        layer.serial = new_serial;
        layer
            .gain
            .ramp_to(volume_curve(layer.volume), LAYER_RAMP_SECS, sample_rate);
        Some(old_serial)
    }

    /// Render one block into the stereo pair (overwrites both buffers).
    /// Inactive slots write silence.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32], sample_rate: f32) {
        debug_assert_eq!(left.len(), right.len());

        let Self::Active(layer) = self else {
            left.fill(0.0);
            right.fill(0.0);
            return;
        };

        match &mut layer.sources {
            Sources::Pure { osc, base_hz } => {
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let s = osc.next(*base_hz, sample_rate) * layer.gain.next();
                    *l = s;
                    *r = s;
                }
            }
            Sources::Binaural { left: lo, right: ro, base_hz, beat_hz } => {
                let f_left = *base_hz - *beat_hz / 2.0;
                let f_right = *base_hz + *beat_hz / 2.0;
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let g = layer.gain.next();
                    *l = lo.next(f_left, sample_rate) * g;
                    *r = ro.next(f_right, sample_rate) * g;
                }
            }
            Sources::Isochronic { osc, gate, base_hz, beat_hz } => {
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let s = osc.next(*base_hz, sample_rate)
                        * gate.next(*beat_hz, sample_rate)
                        * layer.gain.next();
                    *l = s;
                    *r = s;
                }
            }
            Sources::Ambience { noise } => {
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let s = noise.next() * AMBIENCE_TRIM * layer.gain.next();
                    *l = s;
                    *r = s;
                }
            }
        }
    }

    pub fn source_count(&self) -> usize {
        match self {
            Self::Active(layer) => layer.sources.source_count(),
            Self::Inactive => 0,
        }
    }

    /// Oscillator frequencies currently configured (diagnostics).
    pub fn oscillator_frequencies(&self) -> Vec<f32> {
        match self {
            Self::Active(layer) => layer.sources.oscillator_frequencies(),
            Self::Inactive => Vec::new(),
        }
    }

    pub fn serial(&self) -> Option<u64> {
        match self {
            Self::Active(layer) => Some(layer.serial),
            Self::Inactive => None,
        }
    }

    pub fn frequency_id(&self) -> Option<&str> {
        match self {
            Self::Active(layer) => Some(layer.frequency.id.as_str()),
            Self::Inactive => None,
        }
    }

    pub fn mode(&self) -> Option<SoundGenerationMode> {
        match self {
            Self::Active(layer) => Some(layer.mode),
            Self::Inactive => None,
        }
    }
}
