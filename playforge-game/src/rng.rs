//! Randomness abstraction
//!
//! The simulation never reaches for a global RNG: every random decision
//! flows through [`RandomSource`] so frontends can plug a thread RNG while
//! tests and the tester supply seeded or scripted sequences.

use rand::Rng;

/// Number of faces on the die.
pub const DIE_SIDES: u8 = 6;

/// Source of all randomness the simulation consumes.
pub trait RandomSource {
    /// Uniform die roll in `1..=DIE_SIDES`.
    fn die_roll(&mut self) -> u8;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Bernoulli trial with the given success probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Production source backed by any [`rand::Rng`].
pub struct UniformSource<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for UniformSource<R> {
    fn die_roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_SIDES)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}
