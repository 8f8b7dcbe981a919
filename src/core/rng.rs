//! Randomness for initiative rolls.
//!
//! ## Randomizer
//!
//! The engine only ever needs one kind of draw: a uniform index into the
//! roster. `Randomizer` is that seam, so hosts and tests can substitute a
//! scripted source.
//!
//! ## SessionRng
//!
//! The default `Randomizer`: ChaCha8, seedable, with O(1) state capture.
//!
//! ```
//! use table_clock::core::{Randomizer, SessionRng};
//!
//! let mut a = SessionRng::new(42);
//! let mut b = SessionRng::new(42);
//! assert_eq!(a.draw_index(6), b.draw_index(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform index draws.
pub trait Randomizer {
    /// Draw an index uniformly from `0..len`. `len` is never zero.
    fn draw_index(&mut self, len: usize) -> usize;
}

/// Deterministic, seedable session RNG.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> SessionRngState {
        SessionRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &SessionRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Randomizer for SessionRng {
    fn draw_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
