//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice and chance draws
//! - **Context streams**: Independent sequences for different purposes, so
//!   the number of chance draws never shifts the dice sequence
//!
//! ```
//! use board_turns::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut dice = root.for_context("dice");
//! let roll = dice.roll_die(6);
//! assert!((1..=6).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a die with `faces` sides, uniform over `1..=faces`.
    pub fn roll_die(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform fraction in the half-open range.
    pub fn gen_fraction(&mut self, range: Range<f64>) -> f64 {
        self.inner.gen_range(range)
    }
}
