use std::cell::RefCell;

use grasp_core::{ConfigError, Sampleable};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A data point whose outcome is a Bernoulli draw with fixed probability.
///
/// The random source lives in a `RefCell`, so a point can be sampled through
/// a shared reference but cannot be shared across threads.
#[derive(Debug)]
pub struct BernoulliPoint<R = StdRng> {
    probability: f64,
    rng: RefCell<R>,
}

impl BernoulliPoint<StdRng> {
    /// Creates a point seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Probability`] if `probability` is outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self, ConfigError> {
        Self::with_rng(probability, StdRng::from_os_rng())
    }
}

impl<R: Rng> BernoulliPoint<R> {
    /// Creates a point that draws from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Probability`] if `probability` is outside `[0, 1]`.
    pub fn with_rng(probability: f64, rng: R) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::Probability);
        }

        Ok(Self {
            probability,
            rng: RefCell::new(rng),
        })
    }

    /// Returns the probability of success.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<R: Rng> Sampleable for BernoulliPoint<R> {
    fn sample_success(&self) -> bool {
        self.rng.borrow_mut().random_bool(self.probability)
    }
}
