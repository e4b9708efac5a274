//! Guess ordering providers
//!
//! The traverser never touches process-wide randomness: whenever it needs to
//! decide in which order to guess a set of candidates it asks a [`GuessOrder`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Decides the order candidates are guessed in.
pub trait GuessOrder {
    /// Reorder `names` in place
    fn arrange(&mut self, names: &mut [String]);
}

/// Uniformly shuffled order.
#[derive(Debug, Clone)]
pub struct Shuffled {
    rng: StdRng,
}

impl Shuffled {
    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Shuffled {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible order for a given seed
    pub fn seeded(seed: u64) -> Self {
        Shuffled {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl GuessOrder for Shuffled {
    fn arrange(&mut self, names: &mut [String]) {
        names.shuffle(&mut self.rng);
    }
}

/// Leaves names in the order they were given.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsListed;

impl GuessOrder for AsListed {
    fn arrange(&mut self, _names: &mut [String]) {}
}

/// Guesses names in reverse order (handy for tests that need a non-trivial order).
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed;

impl GuessOrder for Reversed {
    fn arrange(&mut self, names: &mut [String]) {
        names.reverse();
    }
}
