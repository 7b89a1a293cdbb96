//! Identifier generation.

use core::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws collision-resistant 128-bit tokens from a seeded stream.
///
/// The stream is part of the table state, so replaying the same operations
/// from the same seed produces the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IdSource {
    rng: ChaCha8Rng,
}

impl IdSource {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub(crate) fn next_token(&mut self) -> u128 {
        self.rng.random()
    }
}

/// Writes the low 64 bits of a token as hex, which is plenty to tell
/// entries apart on screen.
pub(crate) fn fmt_token(token: u128, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:016x}", token as u64)
}
