use grasp_core::ConfigError;
use ndarray::{Array1, ArrayView1};

/// Bandwidth parameters for the [`SquaredExponentialKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    sigma: f64,
    length_scale: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1.0, 1.0).unwrap()
    }
}

impl KernelConfig {
    /// Creates a validated kernel configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` or `length_scale` is not finite and positive.
    pub fn new(sigma: f64, length_scale: f64) -> Result<Self, ConfigError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigError::Sigma);
        }
        if !length_scale.is_finite() || length_scale <= 0.0 {
            return Err(ConfigError::LengthScale);
        }

        Ok(Self {
            sigma,
            length_scale,
        })
    }

    /// Returns the kernel amplitude.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the kernel length scale.
    #[must_use]
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }
}

/// Squared-exponential kernel over the feature map `phi(row) = w ⊙ row`.
///
/// `k(a, b) = sigma² · exp(−‖phi(a) − phi(b)‖² / (2·l²))`
#[derive(Debug, Clone, Copy)]
pub struct SquaredExponentialKernel<'w> {
    config: KernelConfig,
    weights: ArrayView1<'w, f64>,
}

impl<'w> SquaredExponentialKernel<'w> {
    #[must_use]
    pub fn new(config: KernelConfig, weights: ArrayView1<'w, f64>) -> Self {
        Self { config, weights }
    }

    /// Applies the feature map to a row.
    #[must_use]
    pub fn phi(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        &self.weights * &row
    }

    /// Returns `‖phi(a) − phi(b)‖²`.
    #[must_use]
    pub fn squared_distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        self.weights
            .iter()
            .zip(a)
            .zip(b)
            .map(|((w, a), b)| {
                let diff = w * (a - b);
                diff * diff
            })
            .sum()
    }

    /// Evaluates the similarity between two rows.
    #[must_use]
    pub fn evaluate(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let l = self.config.length_scale;
        self.config.sigma.powi(2) * (-self.squared_distance(a, b) / (2.0 * l * l)).exp()
    }

    /// Returns the derivative of `k(a, b)` with respect to each weight.
    ///
    /// `∂k/∂w_d = −k · w_d · (a_d − b_d)² / l²`
    #[must_use]
    pub fn weight_gradient(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> Array1<f64> {
        let k = self.evaluate(a, b);
        let l_sq = self.config.length_scale.powi(2);
        self.weights
            .iter()
            .zip(a)
            .zip(b)
            .map(|((w, a), b)| {
                let diff = a - b;
                -k * w * diff * diff / l_sq
            })
            .collect()
    }
}
