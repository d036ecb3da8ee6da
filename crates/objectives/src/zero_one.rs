use grasp_core::{InputError, Objective, ObjectiveError};

/// Zero-one score based on thresholding.
///
/// Scores `1.0` when `x >= threshold` and `0.0` otherwise. The default
/// threshold is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZeroOneObjective {
    threshold: f64,
}

impl ZeroOneObjective {
    /// Creates an objective that succeeds at or above `threshold`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the success threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns whether `x` reaches the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::InvalidInput`] if `x` is `NaN`.
    pub fn is_success(&self, x: f64) -> Result<bool, ObjectiveError> {
        self.check_valid_input(&x)?;
        Ok(x >= self.threshold)
    }
}

impl Objective<f64> for ZeroOneObjective {
    fn evaluate(&self, x: &f64) -> Result<f64, ObjectiveError> {
        let success = self.is_success(*x)?;
        Ok(if success { 1.0 } else { 0.0 })
    }

    fn check_valid_input(&self, x: &f64) -> Result<(), ObjectiveError> {
        if x.is_nan() {
            return Err(InputError::NotANumber.into());
        }
        Ok(())
    }
}
