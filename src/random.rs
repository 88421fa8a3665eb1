//! The single random stream a simulation draws from.
//!
//! Every stochastic operation in this crate (population shuffling, contact sampling, infection
//! outcome and mortality) takes the generator as an explicit `&mut R where R: Rng` argument. A
//! run is reproducible when the stream is seeded once with [`seeded_rng`] and the draws are
//! consumed in the order the simulation defines.
use log::trace;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The generator used by the runner and by tests.
pub type SimRng = SmallRng;

/// Creates the simulation stream from a base seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> SimRng {
    trace!("initializing random stream with seed {}", seed);
    SimRng::seed_from_u64(seed)
}

/// The two draws the engine needs from a uniform sampler, plus a shuffle.
pub trait RngSampleExt: Rng {
    /// A uniform draw from `[0, 1)`.
    fn sample_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    /// A uniform index in `0..len`. Panics if `len == 0`; callers check for the empty
    /// population first.
    fn sample_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    /// Shuffles `items` in place with this generator.
    fn shuffle_slice<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }
}

impl<R: Rng + ?Sized> RngSampleExt for R {}
