//! Stereo pan laws.

/*
Equal-Power Panning
===================

A pan position maps to a pair of channel gains. The naive linear law
(left = 1-p, right = p) has the same flaw as a linear crossfade: perceived
loudness dips in the middle, because power - not amplitude - is what the ear
tracks for uncorrelated content.

The equal-power law walks the gains along a quarter circle instead:

    θ       = (pan + 1) × π/4        pan ∈ [-1, +1] → θ ∈ [0, π/2]
    left    = cos(θ)
    right   = sin(θ)

    left² + right² = 1 at every position - constant power.

At center this yields 0.707 per channel (-3 dB). For the spatial ("8D")
sweep this engine wants UNITY at center - a layer must sound identical with
the panner disabled and with the panner at rest - so `sweep_gains` scales
the law by √2:

    center:   1.0 / 1.0
    hard L:   1.414 / 0.0

The √2 boost at the extremes is absorbed by the perceptual volume curve
(volumes map through (v/100)², so layers sit well below full scale).
*/

use std::f32::consts::{FRAC_PI_4, SQRT_2};

/// Equal-power gains for a pan position in `[-1, +1]`.
///
/// Center yields (0.707, 0.707) - constant total power.
#[inline]
pub fn equal_power(pan: f32) -> (f32, f32) {
    let theta = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    (theta.cos(), theta.sin())
}

/// Equal-power gains normalized to unity at center.
///
/// This is the law the spatial panner applies: a resting panner is
/// indistinguishable from no panner at all.
#[inline]
pub fn sweep_gains(pan: f32) -> (f32, f32) {
    let (l, r) = equal_power(pan);
    (l * SQRT_2, r * SQRT_2)
}
