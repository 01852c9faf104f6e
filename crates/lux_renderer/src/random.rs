//! Permuted congruential generator (PCG32, O'Neill 2014).
//!
//! The generator is bit-exact with the reference `pcg32_random_r`, so a
//! seed reproduces the same image on every platform. Each pixel of a render
//! owns its own `Pcg` stream; instances are never shared between threads.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// PCG32 state: a 64-bit LCG state plus an odd stream increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg {
    state: u64,
    inc: u64,
}

impl Pcg {
    pub const DEFAULT_INIT_STATE: u64 = 42;
    pub const DEFAULT_INIT_SEQ: u64 = 54;

    /// Seed a generator. `init_seq` selects the stream.
    pub fn new(init_state: u64, init_seq: u64) -> Self {
        let mut pcg = Self {
            state: 0,
            inc: (init_seq << 1) | 1,
        };
        pcg.random();
        pcg.state = pcg.state.wrapping_add(init_state);
        pcg.random();
        pcg
    }

    /// Next 32-bit output.
    #[inline]
    pub fn random(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn random_float(&mut self) -> f32 {
        gen_f32(self)
    }

    /// Uniform double in `[0, 1)`.
    pub fn random_f64(&mut self) -> f64 {
        self.random() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Integer in `[0, bound)` by modulo reduction; zero when `bound` is zero.
    pub fn random_int(&mut self, bound: u32) -> u32 {
        self.random().checked_rem(bound).unwrap_or(0)
    }
}

impl Default for Pcg {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INIT_STATE, Self::DEFAULT_INIT_SEQ)
    }
}

impl RngCore for Pcg {
    fn next_u32(&mut self) -> u32 {
        self.random()
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.random() as u64;
        let low = self.random() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.random().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg {
    /// Little-endian `init_state` followed by `init_seq`.
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut seq = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        seq.copy_from_slice(&seed[8..]);
        Self::new(u64::from_le_bytes(state), u64::from_le_bytes(seq))
    }
}

/// Uniform float in `[0, 1)` from any generator, using the top 24 bits of a
/// 32-bit draw so the result is exactly representable and never reaches 1.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}
