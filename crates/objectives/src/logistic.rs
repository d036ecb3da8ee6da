//! Logistic regression cross-entropy over a coefficient vector `beta`.
//!
//! With `mu = sigmoid(X·beta)`:
//!
//! - the score is the negative log-likelihood
//!   `−Σ[y·ln(mu) + (1 − y)·ln(1 − mu)]`
//! - the gradient is `2·beta − Xᵀ(y − mu)`
//! - the hessian is `2 − Xᵀ·diag(mu·(1 − mu))·X`, where the `2` is subtracted
//!   from every entry
//!
//! The `2·beta` and `2` terms add a ridge-like penalty that the score itself
//! does not carry, so the gradient is not the derivative of the score.

mod stochastic;

pub use stochastic::StochasticLogisticCrossEntropyObjective;

use grasp_core::{DifferentiableObjective, InputError, Objective, ObjectiveError, Point};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;

/// Full-batch logistic cross-entropy for design matrix `X` and labels `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticCrossEntropyObjective {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl LogisticCrossEntropyObjective {
    /// Creates the objective from one row of features per label.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::DimensionMismatch`] if `y` does not have one
    /// label per row of `x`.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self, ObjectiveError> {
        ObjectiveError::ensure_dimension("y", x.nrows(), y.len())?;

        debug!(
            rows = x.nrows(),
            features = x.ncols(),
            "built logistic cross-entropy objective"
        );

        Ok(Self { x, y })
    }

    #[must_use]
    pub fn design(&self) -> &Array2<f64> {
        &self.x
    }

    #[must_use]
    pub fn labels(&self) -> &Array1<f64> {
        &self.y
    }

    /// Returns the required length of `beta`, the column count of `X`.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.x.nrows()
    }
}

impl Objective for LogisticCrossEntropyObjective {
    fn evaluate(&self, beta: &Point) -> Result<f64, ObjectiveError> {
        self.check_valid_input(beta)?;
        Ok(negative_log_likelihood(self.x.view(), self.y.view(), beta))
    }

    fn check_valid_input(&self, beta: &Point) -> Result<(), ObjectiveError> {
        InputError::check_length(self.num_features(), beta.len())?;
        Ok(())
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective> {
        Some(self)
    }
}

impl DifferentiableObjective for LogisticCrossEntropyObjective {
    fn gradient(&self, beta: &Point) -> Result<Array1<f64>, ObjectiveError> {
        self.check_valid_input(beta)?;
        Ok(gradient(self.x.view(), self.y.view(), beta, 1.0))
    }

    fn hessian(&self, beta: &Point) -> Result<Array2<f64>, ObjectiveError> {
        self.check_valid_input(beta)?;
        Ok(hessian(self.x.view(), beta, 1.0))
    }
}

/// Elementwise `1 / (1 + exp(−X·beta))`.
fn mu(x: ArrayView2<'_, f64>, beta: &Point) -> Array1<f64> {
    x.dot(beta).mapv_into(|z| 1.0 / (1.0 + (-z).exp()))
}

/// `ln(1 + eᵗ)` without overflow for large `t`.
fn softplus(t: f64) -> f64 {
    t.max(0.0) + (-t.abs()).exp().ln_1p()
}

// Uses ln(mu) = −softplus(−z) and ln(1 − mu) = −softplus(z), which stay
// finite where mu rounds to 0 or 1.
fn negative_log_likelihood(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    beta: &Point,
) -> f64 {
    x.dot(beta)
        .iter()
        .zip(y)
        .map(|(&z, &label)| label * softplus(-z) + (1.0 - label) * softplus(z))
        .sum()
}

// The data terms are multiplied by `scale`; the `2·beta` and `2` terms are not.
fn gradient(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    beta: &Point,
    scale: f64,
) -> Array1<f64> {
    let residual = &y - &mu(x, beta);
    beta * 2.0 - x.t().dot(&residual) * scale
}

fn hessian(x: ArrayView2<'_, f64>, beta: &Point, scale: f64) -> Array2<f64> {
    let weights = mu(x, beta).mapv_into(|m| m * (1.0 - m));
    let weighted_rows = &x * &weights.insert_axis(Axis(1));
    x.t().dot(&weighted_rows).mapv_into(|v| 2.0 - scale * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::test_utils::{numerical_gradient, random_matrix, random_vector};

    fn sample_problem() -> LogisticCrossEntropyObjective {
        let x = array![[1.0, 0.5], [1.0, -1.5], [1.0, 2.0], [1.0, 0.0]];
        let y = array![1.0, 0.0, 1.0, 0.0];
        LogisticCrossEntropyObjective::new(x, y).unwrap()
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let err = LogisticCrossEntropyObjective::new(Array2::zeros((3, 2)), Array1::zeros(2));
        assert!(matches!(
            err,
            Err(ObjectiveError::DimensionMismatch {
                what: "y",
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn wrong_beta_length_is_invalid_input() {
        let objective = sample_problem();
        let beta = array![0.1, 0.2, 0.3];

        for result in [
            objective.evaluate(&beta).map(|_| ()),
            objective.gradient(&beta).map(|_| ()),
            objective.hessian(&beta).map(|_| ()),
        ] {
            assert_eq!(
                result,
                Err(ObjectiveError::InvalidInput(InputError::Length {
                    expected: 2,
                    actual: 3
                }))
            );
        }
    }

    #[test]
    fn keeps_training_data() {
        let objective = sample_problem();

        assert_eq!(objective.design().dim(), (4, 2));
        assert_eq!(objective.labels(), &array![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(objective.num_features(), 2);
    }

    #[test]
    fn zero_coefficients_score_ln_two_per_row() {
        let objective = sample_problem();
        let score = objective.evaluate(&array![0.0, 0.0]).unwrap();

        assert_relative_eq!(score, 4.0 * std::f64::consts::LN_2, epsilon = 1e-12);
    }

    #[test]
    fn matches_naive_log_likelihood() {
        let objective = sample_problem();
        let beta = array![0.3, -0.8];

        let m = mu(objective.x.view(), &beta);
        let naive: f64 = -objective
            .y
            .iter()
            .zip(&m)
            .map(|(&y, &m)| y * m.ln() + (1.0 - y) * (1.0 - m).ln())
            .sum::<f64>();

        assert_relative_eq!(objective.evaluate(&beta).unwrap(), naive, epsilon = 1e-12);
    }

    #[test]
    fn extreme_margins_stay_finite() {
        let objective =
            LogisticCrossEntropyObjective::new(array![[1.0], [1.0]], array![1.0, 0.0]).unwrap();
        let score = objective.evaluate(&array![800.0]).unwrap();

        assert!(score.is_finite());
        assert_relative_eq!(score, 800.0, epsilon = 1e-9);
    }

    #[test]
    fn gradient_is_penalized_likelihood_gradient() {
        // The gradient of the score plus ‖beta‖².
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..4 {
            let x = random_matrix(&mut rng, 6, 3);
            let y = random_vector(&mut rng, 6).mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
            let beta = random_vector(&mut rng, 3);

            let objective = LogisticCrossEntropyObjective::new(x, y).unwrap();

            let numeric =
                numerical_gradient(|b| objective.evaluate(b).unwrap() + b.dot(b), &beta, 1e-6);

            assert_relative_eq!(objective.gradient(&beta).unwrap(), numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn hessian_subtracts_weighted_gram_from_two() {
        let objective = sample_problem();
        let beta = array![0.2, 0.4];

        let m = mu(objective.x.view(), &beta);
        let diag = Array2::from_diag(&m.mapv(|v| v * (1.0 - v)));
        let expected = objective
            .x
            .t()
            .dot(&diag)
            .dot(&objective.x)
            .mapv(|v| 2.0 - v);

        let actual = objective.hessian(&beta).unwrap();

        assert_eq!(actual.dim(), (2, 2));
        assert_relative_eq!(actual, expected, epsilon = 1e-12);
        assert_relative_eq!(actual[[0, 1]], actual[[1, 0]], epsilon = 1e-12);
    }
}
