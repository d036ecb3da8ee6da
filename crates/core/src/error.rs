use thiserror::Error;

/// Errors returned by objective construction and evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObjectiveError {
    /// The point failed the objective's input check.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Data supplied at construction have inconsistent shapes.
    #[error("dimension mismatch: {what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A derivative was requested from an objective that has none.
    #[error("objective is not differentiable")]
    NonDifferentiable,

    /// The operation is intentionally left unimplemented by this objective.
    #[error("{operation} is not supported by this objective")]
    NotSupported { operation: &'static str },

    /// A sampling objective was built over a dataset with no rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ObjectiveError {
    /// Checks that a piece of construction data has the expected length.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::DimensionMismatch`] if `actual != expected`.
    pub fn ensure_dimension(
        what: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if actual == expected {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

/// Reasons a point is rejected by [`Objective::check_valid_input`].
///
/// [`Objective::check_valid_input`]: crate::Objective::check_valid_input
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("expected length {expected}, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("value is not a number")]
    NotANumber,
}

impl InputError {
    /// Checks that a point has the length an objective was configured for.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Length`] if `actual != expected`.
    pub fn check_length(expected: usize, actual: usize) -> Result<(), Self> {
        if actual == expected {
            Ok(())
        } else {
            Err(Self::Length { expected, actual })
        }
    }
}

/// Errors that can occur when validating objective configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch_size must be at least 1")]
    BatchSize,

    #[error("sigma must be finite and positive")]
    Sigma,

    #[error("length_scale must be finite and positive")]
    LengthScale,

    #[error("probability must be within [0, 1]")]
    Probability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_length_accepts_match() {
        assert_eq!(InputError::check_length(3, 3), Ok(()));
    }

    #[test]
    fn check_length_reports_both_lengths() {
        let err = InputError::check_length(3, 2).unwrap_err();
        assert_eq!(
            err,
            InputError::Length {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(err.to_string(), "expected length 3, got 2");
    }

    #[test]
    fn input_error_converts_to_objective_error() {
        fn check() -> Result<(), ObjectiveError> {
            InputError::check_length(2, 5)?;
            Ok(())
        }

        assert!(matches!(
            check(),
            Err(ObjectiveError::InvalidInput(InputError::Length { .. }))
        ));
    }

    #[test]
    fn ensure_dimension_names_offending_data() {
        let err = ObjectiveError::ensure_dimension("b", 4, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dimension mismatch: b has length 3, expected 4"
        );
    }
}
