use derive_more::DebugCustom;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::ops::RangeInclusive;
use tracing::instrument;

/// A source of randomness for game events.
#[cfg_attr(test, mockall::automock)]
pub trait Dice {
    /// Draws a number uniformly from `range`, which must not be empty.
    fn roll(&mut self, range: RangeInclusive<usize>) -> usize;
}

/// A dynamically dispatched wrapper for any type that implements [`rand::RngCore`].
#[derive(DebugCustom)]
#[debug(fmt = "Random")]
pub struct Random(Box<dyn RngCore + Send + 'static>);

impl Random {
    /// Constructs [`Random`] from any type that implements [`rand::RngCore`].
    pub fn new<R: RngCore + Send + 'static>(rng: R) -> Self {
        Random(Box::new(rng))
    }

    /// Constructs [`Random`] that always yields the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Random::new(StdRng::seed_from_u64(seed))
    }
}

/// Initializes a [`rand::rngs::StdRng`] seeded by [system entropy].
///
/// [system entropy]: rand::rngs::StdRng::from_entropy
impl Default for Random {
    fn default() -> Self {
        Random::new(StdRng::from_entropy())
    }
}

impl Dice for Random {
    #[instrument(level = "trace", ret)]
    fn roll(&mut self, range: RangeInclusive<usize>) -> usize {
        self.0.gen_range(range)
    }
}
