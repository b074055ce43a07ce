//! Block-level signal primitives.
//!
//! Everything in this module is allocation-free after construction and safe
//! to call from an audio callback.

pub mod gate;
pub mod noise;
pub mod oscillator;
pub mod pan;
pub mod smoother;
