//! Ambience noise sources.

/*
Noise For Ambience Layers
=========================

Ambience entries in the catalog (rain, ocean, wind beds) are not oscillators -
they are shaped noise. Two colors are enough for this engine:

  WHITE   Equal energy per Hz. Sounds like hiss / static. Used as the raw
          source and for bright textures.

  PINK    Equal energy per octave (-3 dB/octave rolloff). Sounds like
          rainfall or distant surf - far less fatiguing than white noise,
          which is why every "ambient sound" preset is pink-ish.

White noise comes from a 32-bit xorshift PRNG. It is not cryptographic and
does not need to be; it is fast, allocation-free, and has a period far beyond
any listening session. Seeding is fixed so renders are reproducible in tests.

Pink noise uses the Paul Kellet three-pole approximation: three one-pole
lowpass filters fed by the same white sample, summed with tuned weights.
Accurate to within ±0.5 dB across the audio band, and three multiplies per
sample - fine for a bed layer.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    White,
    Pink,
}

/// Seeded noise generator, one sample per call.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    color: NoiseColor,
    state: u32,
    // Pink filter memory (Paul Kellet approximation)
    b0: f32,
    b1: f32,
    b2: f32,
}

impl NoiseSource {
    pub fn new(color: NoiseColor) -> Self {
        Self {
            color,
            state: 0x9E37_79B9,
            b0: 0.0,
            b1: 0.0,
            b2: 0.0,
        }
    }

    /// Next white sample in [-1, 1).
    #[inline]
    fn next_white(&mut self) -> f32 {
        // xorshift32
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    /// Produce one noise sample.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let white = self.next_white();
        match self.color {
            NoiseColor::White => white,
            NoiseColor::Pink => {
                self.b0 = 0.997 * self.b0 + 0.029_591 * white;
                self.b1 = 0.985 * self.b1 + 0.032_534 * white;
                self.b2 = 0.950 * self.b2 + 0.048_056 * white;
                // Weighted sum plus a direct tap; 0.55 normalizes the peak
                // level back into roughly [-1, 1].
                (self.b0 + self.b1 + self.b2 + 0.153_852 * white) * 0.55
            }
        }
    }

    /// Fill `out` with noise (overwrites the buffer).
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next();
        }
    }
}
