use parking_lot::Mutex;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Entropy used by [`RandomTokenGenerator`](crate::RandomTokenGenerator).
///
/// Swappable so tests can substitute a deterministic source.
pub trait RandomSource: Send + Sync + 'static {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Returns a uniformly distributed index in `0..upper`. `upper` is never zero.
    fn index(&self, upper: usize) -> usize;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }

    fn index(&self, upper: usize) -> usize {
        OsRng.gen_range(0..upper)
    }
}

/// A seeded generator producing the same stream for the same seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.rng.lock().fill_bytes(dest);
    }

    fn index(&self, upper: usize) -> usize {
        self.rng.lock().gen_range(0..upper)
    }
}
