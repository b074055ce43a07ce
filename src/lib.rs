pub mod breath;
pub mod catalog; // Static frequency/session/pattern data
pub mod dsp;
pub mod engine; // Tone layers, spatial panning, mixing, analysis
pub mod error;
pub mod player;
pub mod prefs;
pub mod remote;
pub mod session;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
