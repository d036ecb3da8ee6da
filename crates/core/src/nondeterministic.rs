use tracing::trace;

use crate::{Objective, ObjectiveError, Sampleable};

/// Evaluates a deterministic objective on a random realization of its input.
///
/// Each call to [`Objective::evaluate`] draws one outcome from the input with
/// [`Sampleable::sample_success`] and scores it with the wrapped objective, so
/// repeated calls with the same point may return different values. A success
/// is handed to the wrapped objective as `1.0` and a failure as `0.0`.
///
/// Inputs without a sampling operation are rejected at compile time by the
/// [`Sampleable`] bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonDeterministicObjective<O> {
    deterministic: O,
}

impl<O> NonDeterministicObjective<O> {
    /// Wraps a deterministic objective over realizations.
    ///
    /// The `O: Objective<f64>` bound is checked where the wrapper is used as
    /// an [`Objective`], not here.
    #[must_use]
    pub fn new(deterministic: O) -> Self {
        Self { deterministic }
    }

    /// Returns the wrapped deterministic objective.
    #[must_use]
    pub fn deterministic(&self) -> &O {
        &self.deterministic
    }
}

impl<X, O> Objective<X> for NonDeterministicObjective<O>
where
    X: Sampleable + ?Sized,
    O: Objective<f64>,
{
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError> {
        self.check_valid_input(x)?;

        let success = x.sample_success();
        trace!(success, "sampled realization");

        let realization = if success { 1.0 } else { 0.0 };
        self.deterministic.evaluate(&realization)
    }

    // Any `Sampleable` is acceptable; the realization is checked by the
    // wrapped objective.
    fn check_valid_input(&self, _x: &X) -> Result<(), ObjectiveError> {
        Ok(())
    }
}
