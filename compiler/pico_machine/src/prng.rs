//! Multiply-with-carry generator behind `rnd` and `srand`.
//!
//! Two 16-bit MWC lags combined into one 32-bit output (Marsaglia). Not
//! suitable for anything but games.

/// Initial value of the `z` lag.
const Z_INIT: u32 = 987_654_321;

/// Replacement for a zero seed; a zero `w` lag never leaves zero.
const W_FALLBACK: u32 = 521_288_629;

const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prng {
    z: u32,
    w: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        let mut prng = Prng { z: Z_INIT, w: 0 };
        prng.seed(seed);
        prng
    }

    /// Restart the sequence from `seed`.
    pub fn seed(&mut self, seed: u32) {
        self.z = Z_INIT;
        self.w = if seed == 0 { W_FALLBACK } else { seed };
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.z = 36969u32
            .wrapping_mul(self.z & 0xFFFF)
            .wrapping_add(self.z >> 16);
        self.w = 18000u32
            .wrapping_mul(self.w & 0xFFFF)
            .wrapping_add(self.w >> 16);
        (self.z << 16).wrapping_add(self.w)
    }

    /// Uniform value in `[0, scale)` (or `(scale, 0]` for negative scale).
    pub fn next_scaled(&mut self, scale: f64) -> f64 {
        scale * (f64::from(self.next_u32()) / TWO_POW_32)
    }
}

/// Seed derived from the wall clock, for machines without a fixed seed.
pub fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(W_FALLBACK, |d| d.subsec_nanos() ^ (d.as_secs() as u32))
}
