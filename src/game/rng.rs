//! Seeded random number generation for board setup.
//!
//! The same seed always produces the same board, which is what makes
//! recordings replayable and simulations reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by a single board generation or bot.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random u16 in `[0, max)`.
    ///
    /// Returns 0 when `max` is 0.
    pub fn below(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Generate a random index in `[0, len)`.
    ///
    /// Returns 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let idx = self.index(slice.len());
        slice.get(idx)
    }
}

/// A seed taken from the system clock, for games started without one.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
