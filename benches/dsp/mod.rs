//! Benchmarks for low-level DSP primitives.

mod gate;
mod noise;
mod oscillator;
mod pan;

pub use gate::bench_gate;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
pub use pan::bench_pan;
