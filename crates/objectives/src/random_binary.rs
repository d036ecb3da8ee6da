use grasp_core::{NonDeterministicObjective, Objective, ObjectiveError, Sampleable};

use crate::ZeroOneObjective;

/// Draws are realized as `0.0` or `1.0`, so a fair-coin cut maps them
/// straight to failure or success.
const FAIR_COIN: f64 = 0.5;

/// Scores a random draw from a data point as `1.0` for success, `0.0` otherwise.
///
/// This is a [`NonDeterministicObjective`] over a [`ZeroOneObjective`] with a
/// threshold of one half, and serves as the default stochastic objective for
/// any [`Sampleable`] data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomBinaryObjective(NonDeterministicObjective<ZeroOneObjective>);

impl RandomBinaryObjective {
    #[must_use]
    pub fn new() -> Self {
        Self(NonDeterministicObjective::new(ZeroOneObjective::new(
            FAIR_COIN,
        )))
    }
}

impl Default for RandomBinaryObjective {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Sampleable + ?Sized> Objective<X> for RandomBinaryObjective {
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError> {
        self.0.evaluate(x)
    }

    fn check_valid_input(&self, x: &X) -> Result<(), ObjectiveError> {
        self.0.check_valid_input(x)
    }
}
