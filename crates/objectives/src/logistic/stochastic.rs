use std::cell::RefCell;

use grasp_core::{DifferentiableObjective, Objective, ObjectiveError, Point};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{LogisticCrossEntropyObjective, gradient, hessian};
use crate::minibatch::{BatchSize, sample_indices};

/// Logistic cross-entropy whose derivatives are estimated on random mini-batches.
///
/// [`Objective::evaluate`] scores the full dataset. [`gradient`] and
/// [`hessian`] use the rows chosen by [`random_datum`], with the data terms
/// `Xᵀ(y − mu)` and `XᵀWX` scaled by `rows / batch_size`. The `2·beta` and `2`
/// terms are not scaled, so each estimate is unbiased for the full-batch
/// derivatives.
///
/// [`gradient`]: DifferentiableObjective::gradient
/// [`hessian`]: DifferentiableObjective::hessian
/// [`random_datum`]: Self::random_datum
#[derive(Debug)]
pub struct StochasticLogisticCrossEntropyObjective<R = StdRng> {
    full: LogisticCrossEntropyObjective,
    batch_size: BatchSize,
    rng: RefCell<R>,
}

impl StochasticLogisticCrossEntropyObjective<StdRng> {
    /// Creates the objective with a random source seeded from the operating system.
    ///
    /// # Errors
    ///
    /// See [`with_rng`](Self::with_rng).
    pub fn new(
        x: Array2<f64>,
        y: Array1<f64>,
        batch_size: BatchSize,
    ) -> Result<Self, ObjectiveError> {
        Self::with_rng(x, y, batch_size, StdRng::from_os_rng())
    }
}

impl<R: Rng> StochasticLogisticCrossEntropyObjective<R> {
    /// Creates the objective, drawing mini-batches from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::DimensionMismatch`] if `y` does not have one
    /// label per row of `x`, or [`ObjectiveError::EmptyDataset`] if `x` has
    /// no rows.
    pub fn with_rng(
        x: Array2<f64>,
        y: Array1<f64>,
        batch_size: BatchSize,
        rng: R,
    ) -> Result<Self, ObjectiveError> {
        let full = LogisticCrossEntropyObjective::new(x, y)?;
        if full.num_rows() == 0 {
            return Err(ObjectiveError::EmptyDataset);
        }

        Ok(Self {
            full,
            batch_size,
            rng: RefCell::new(rng),
        })
    }

    /// Returns the full-batch objective.
    #[must_use]
    pub fn full_batch(&self) -> &LogisticCrossEntropyObjective {
        &self.full
    }

    #[must_use]
    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    /// Draws a mini-batch, returning its rows of `X` and their labels.
    #[must_use]
    pub fn random_datum(&self) -> (Array2<f64>, Array1<f64>) {
        let indices = sample_indices(
            self.full.num_rows(),
            self.batch_size,
            &mut *self.rng.borrow_mut(),
        );
        (
            self.full.x.select(Axis(0), &indices),
            self.full.y.select(Axis(0), &indices),
        )
    }

    /// Factor that lifts a mini-batch sum to the scale of the full dataset.
    #[allow(clippy::cast_precision_loss)]
    fn batch_scale(&self) -> f64 {
        self.full.num_rows() as f64 / self.batch_size.get() as f64
    }
}

impl<R: Rng> Objective for StochasticLogisticCrossEntropyObjective<R> {
    fn evaluate(&self, beta: &Point) -> Result<f64, ObjectiveError> {
        self.full.evaluate(beta)
    }

    fn check_valid_input(&self, beta: &Point) -> Result<(), ObjectiveError> {
        self.full.check_valid_input(beta)
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective> {
        Some(self)
    }
}

impl<R: Rng> DifferentiableObjective for StochasticLogisticCrossEntropyObjective<R> {
    fn gradient(&self, beta: &Point) -> Result<Array1<f64>, ObjectiveError> {
        self.check_valid_input(beta)?;
        let (x, y) = self.random_datum();
        Ok(gradient(x.view(), y.view(), beta, self.batch_scale()))
    }

    fn hessian(&self, beta: &Point) -> Result<Array2<f64>, ObjectiveError> {
        self.check_valid_input(beta)?;
        let (x, _) = self.random_datum();
        Ok(hessian(x.view(), beta, self.batch_scale()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use grasp_core::{ConfigError, InputError};
    use ndarray::array;

    fn design() -> (Array2<f64>, Array1<f64>) {
        (
            array![[1.0, 0.5], [1.0, -1.5], [1.0, 2.0]],
            array![1.0, 0.0, 1.0],
        )
    }

    fn seeded(batch: usize) -> StochasticLogisticCrossEntropyObjective {
        let (x, y) = design();
        StochasticLogisticCrossEntropyObjective::with_rng(
            x,
            y,
            BatchSize::new(batch).unwrap(),
            StdRng::seed_from_u64(99),
        )
        .unwrap()
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let result = StochasticLogisticCrossEntropyObjective::with_rng(
            Array2::zeros((0, 2)),
            Array1::zeros(0),
            BatchSize::default(),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ObjectiveError::EmptyDataset)));
    }

    #[test]
    fn zero_batch_size_is_a_config_error() {
        let err: ObjectiveError = BatchSize::new(0).unwrap_err().into();
        assert_eq!(err, ObjectiveError::Config(ConfigError::BatchSize));
    }

    #[test]
    fn evaluate_uses_full_dataset() {
        let objective = seeded(1);
        let beta = array![0.25, -0.5];

        assert_relative_eq!(
            objective.evaluate(&beta).unwrap(),
            objective.full_batch().evaluate(&beta).unwrap()
        );
    }

    #[test]
    fn batch_of_every_row_matches_full_batch() {
        let objective = seeded(3);
        let beta = array![0.1, 0.7];

        assert_relative_eq!(
            objective.gradient(&beta).unwrap(),
            objective.full_batch().gradient(&beta).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            objective.hessian(&beta).unwrap(),
            objective.full_batch().hessian(&beta).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn two_full_passes_match_full_batch() {
        let objective = seeded(6);
        let beta = array![0.1, 0.7];

        assert_relative_eq!(
            objective.gradient(&beta).unwrap(),
            objective.full_batch().gradient(&beta).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            objective.hessian(&beta).unwrap(),
            objective.full_batch().hessian(&beta).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn single_row_gradient_comes_from_one_scaled_datum() {
        let objective = seeded(1);
        let (x, y) = design();
        let beta = array![-0.3, 0.2];

        // Three rows, one per batch.
        let per_row: Vec<Array1<f64>> = (0..x.nrows())
            .map(|i| {
                let xi = x.select(Axis(0), &[i]);
                let yi = y.select(Axis(0), &[i]);
                gradient(xi.view(), yi.view(), &beta, 3.0)
            })
            .collect();

        for _ in 0..20 {
            let sampled = objective.gradient(&beta).unwrap();
            assert!(
                per_row.iter().any(|g| g.abs_diff_eq(&sampled, 1e-12)),
                "{sampled} is not a single-row gradient"
            );
        }
    }

    #[test]
    fn single_row_gradients_average_to_full_batch() {
        let objective = seeded(1);
        let (x, y) = design();
        let beta = array![0.4, -0.1];

        let per_row = (0..x.nrows()).map(|i| {
            let xi = x.select(Axis(0), &[i]);
            let yi = y.select(Axis(0), &[i]);
            gradient(xi.view(), yi.view(), &beta, 3.0)
        });
        let mean = per_row.fold(Array1::<f64>::zeros(2), |acc, g| acc + g) / 3.0;

        assert_relative_eq!(
            mean,
            objective.full_batch().gradient(&beta).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn random_datum_has_batch_size_rows() {
        let objective = seeded(5);
        let (x, y) = objective.random_datum();

        assert_eq!(x.dim(), (5, 2));
        assert_eq!(y.len(), 5);
        assert_eq!(objective.batch_size().get(), 5);
    }

    #[test]
    fn invalid_beta_is_rejected_before_sampling() {
        let objective = seeded(2);
        let beta = array![1.0];

        assert_eq!(
            objective.gradient(&beta).map(|_| ()),
            Err(ObjectiveError::InvalidInput(InputError::Length {
                expected: 2,
                actual: 1
            }))
        );
    }
}
