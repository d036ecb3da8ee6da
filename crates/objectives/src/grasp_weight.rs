//! Kernel-smoothed Beta-Bernoulli score for grasp feature weights.
//!
//! Each grasp `i` is a row `x_i` of the design matrix with `S_i` observed
//! successes and `F_i` observed failures. For a weight vector `w`, a
//! [`SquaredExponentialKernel`] over `phi(row) = w ⊙ row` lets every grasp
//! borrow evidence from its neighbors:
//!
//! ```text
//! alpha_i = 1 + Σ_{j≠i} k(x_i, x_j)·S_j
//! beta_i  = 1 + Σ_{j≠i} k(x_i, x_j)·F_j
//! ```
//!
//! and the score sums
//! `mu_i·ln(alpha_i) + (1 − mu_i)·ln(beta_i) − ln(alpha_i + beta_i)` over all
//! grasps, where `mu_i = S_i / F_i`. Evaluation costs O(rows²) kernel calls.
//!
//! Note that `mu_i` is the success-to-failure ratio, not the success rate
//! `S_i / N_i`. A grasp with no failures has an infinite `mu_i`.

mod kernel;

pub use kernel::{KernelConfig, SquaredExponentialKernel};

use std::cell::RefCell;

use grasp_core::{DifferentiableObjective, InputError, Objective, ObjectiveError, Point};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

use crate::minibatch::{BatchSize, sample_indices};

/// Stochastic-gradient objective over grasp feature weights.
///
/// [`Objective::evaluate`] scores every grasp. [`gradient`] samples
/// `batch_size` grasps (one by default) and scales their exact gradient
/// terms by `rows / batch_size`, an unbiased estimate of the full gradient.
/// Second-order information is not available.
///
/// [`gradient`]: DifferentiableObjective::gradient
#[derive(Debug)]
pub struct StochasticGraspWeightObjective<R = StdRng> {
    x: Array2<f64>,
    successes: Array1<f64>,
    failures: Array1<f64>,
    trials: Array1<f64>,
    mu: Array1<f64>,
    kernel_config: KernelConfig,
    batch_size: BatchSize,
    rng: RefCell<R>,
}

impl StochasticGraspWeightObjective<StdRng> {
    /// Creates the objective with a random source seeded from the operating system.
    ///
    /// # Errors
    ///
    /// See [`with_rng`](Self::with_rng).
    pub fn new(
        x: Array2<f64>,
        successes: Array1<f64>,
        failures: Array1<f64>,
        kernel_config: KernelConfig,
    ) -> Result<Self, ObjectiveError> {
        Self::with_rng(x, successes, failures, kernel_config, StdRng::from_os_rng())
    }
}

impl<R: Rng> StochasticGraspWeightObjective<R> {
    /// Creates the objective, sampling grasps from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::DimensionMismatch`] if the success or failure
    /// counts do not have one entry per row of `x`, or
    /// [`ObjectiveError::EmptyDataset`] if `x` has no rows.
    pub fn with_rng(
        x: Array2<f64>,
        successes: Array1<f64>,
        failures: Array1<f64>,
        kernel_config: KernelConfig,
        rng: R,
    ) -> Result<Self, ObjectiveError> {
        ObjectiveError::ensure_dimension("successes", x.nrows(), successes.len())?;
        ObjectiveError::ensure_dimension("failures", x.nrows(), failures.len())?;
        if x.nrows() == 0 {
            return Err(ObjectiveError::EmptyDataset);
        }

        let trials = &successes + &failures;
        let mu = &successes / &failures;

        let non_finite = mu.iter().filter(|m| !m.is_finite()).count();
        if non_finite > 0 {
            warn!(
                non_finite,
                "success/failure ratio is not finite for some grasps"
            );
        }

        debug!(
            grasps = x.nrows(),
            features = x.ncols(),
            sigma = kernel_config.sigma(),
            length_scale = kernel_config.length_scale(),
            "built grasp-weight objective"
        );

        Ok(Self {
            x,
            successes,
            failures,
            trials,
            mu,
            kernel_config,
            batch_size: BatchSize::default(),
            rng: RefCell::new(rng),
        })
    }

    /// Sets the number of grasps sampled per gradient.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: BatchSize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    #[must_use]
    pub fn num_grasps(&self) -> usize {
        self.x.nrows()
    }

    /// Returns the required length of `w`, the column count of `X`.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    /// Returns the number of trials `S + F` per grasp.
    #[must_use]
    pub fn trials(&self) -> &Array1<f64> {
        &self.trials
    }

    /// Returns the ratio `S / F` per grasp.
    #[must_use]
    pub fn mu(&self) -> &Array1<f64> {
        &self.mu
    }

    /// Builds the kernel for weight vector `w`.
    #[must_use]
    pub fn kernel<'w>(&self, w: &'w Point) -> SquaredExponentialKernel<'w> {
        SquaredExponentialKernel::new(self.kernel_config, w.view())
    }

    /// Returns `(alpha_i, beta_i)` for grasp `i`.
    fn pseudo_counts(&self, kernel: &SquaredExponentialKernel<'_>, i: usize) -> (f64, f64) {
        let xi = self.x.row(i);
        self.x
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold((1.0, 1.0), |(alpha, beta), (j, xj)| {
                let k = kernel.evaluate(xi, xj);
                (alpha + k * self.successes[j], beta + k * self.failures[j])
            })
    }

    /// Gradient of grasp `i`'s term of the score with respect to `w`.
    fn row_gradient(&self, w: &Point, i: usize) -> Array1<f64> {
        let kernel = self.kernel(w);
        let (alpha, beta) = self.pseudo_counts(&kernel, i);
        let mu = self.mu[i];
        let xi = self.x.row(i);

        let mut grad = Array1::<f64>::zeros(self.num_features());
        for (j, xj) in self.x.rows().into_iter().enumerate() {
            if j == i {
                continue;
            }
            let coeff = mu * self.successes[j] / alpha + (1.0 - mu) * self.failures[j] / beta
                - self.trials[j] / (alpha + beta);
            grad.scaled_add(coeff, &kernel.weight_gradient(xi, xj));
        }
        grad
    }
}

impl<R: Rng> Objective for StochasticGraspWeightObjective<R> {
    fn evaluate(&self, w: &Point) -> Result<f64, ObjectiveError> {
        self.check_valid_input(w)?;
        let kernel = self.kernel(w);

        let total = (0..self.num_grasps())
            .map(|i| {
                let (alpha, beta) = self.pseudo_counts(&kernel, i);
                let mu = self.mu[i];
                mu * alpha.ln() + (1.0 - mu) * beta.ln() - (alpha + beta).ln()
            })
            .sum();
        Ok(total)
    }

    fn check_valid_input(&self, w: &Point) -> Result<(), ObjectiveError> {
        InputError::check_length(self.num_features(), w.len())?;
        Ok(())
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective> {
        Some(self)
    }
}

impl<R: Rng> DifferentiableObjective for StochasticGraspWeightObjective<R> {
    fn gradient(&self, w: &Point) -> Result<Array1<f64>, ObjectiveError> {
        self.check_valid_input(w)?;

        let indices = sample_indices(
            self.num_grasps(),
            self.batch_size,
            &mut *self.rng.borrow_mut(),
        );

        let mut grad = Array1::<f64>::zeros(self.num_features());
        for &i in &indices {
            grad += &self.row_gradient(w, i);
        }

        #[allow(clippy::cast_precision_loss)]
        let scale = self.num_grasps() as f64 / indices.len() as f64;
        Ok(grad * scale)
    }

    fn hessian(&self, _w: &Point) -> Result<Array2<f64>, ObjectiveError> {
        Err(ObjectiveError::NotSupported {
            operation: "hessian",
        })
    }
}
