use grasp_core::{DifferentiableObjective, InputError, Objective, ObjectiveError, Point};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Classic least-squares loss `½‖Ax − b‖²`.
///
/// The loss is evaluated in its expanded form
/// `½(xᵀAᵀAx − 2bᵀAx + bᵀb)`, with `AᵀA`, `Aᵀb`, and `bᵀb` computed once at
/// construction. The hessian `AᵀA` does not depend on `x`.
///
/// This is a loss; wrap it in a [`MinimizationObjective`] before handing it to
/// a maximizer.
///
/// [`MinimizationObjective`]: grasp_core::MinimizationObjective
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresObjective {
    a: Array2<f64>,
    b: Array1<f64>,
    gram: Array2<f64>,
    a_t_b: Array1<f64>,
    b_t_b: f64,
}

impl LeastSquaresObjective {
    /// Creates the objective for design matrix `a` and target `b`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::DimensionMismatch`] if `b` does not have one
    /// entry per row of `a`.
    pub fn new(a: Array2<f64>, b: Array1<f64>) -> Result<Self, ObjectiveError> {
        ObjectiveError::ensure_dimension("b", a.nrows(), b.len())?;

        let gram = a.t().dot(&a);
        let a_t_b = a.t().dot(&b);
        let b_t_b = b.dot(&b);

        debug!(
            rows = a.nrows(),
            cols = a.ncols(),
            "built least-squares objective"
        );

        Ok(Self {
            a,
            b,
            gram,
            a_t_b,
            b_t_b,
        })
    }

    #[must_use]
    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    #[must_use]
    pub fn b(&self) -> &Array1<f64> {
        &self.b
    }

    /// Returns the required length of `x`, the column count of `A`.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.a.ncols()
    }
}

impl Objective for LeastSquaresObjective {
    fn evaluate(&self, x: &Point) -> Result<f64, ObjectiveError> {
        self.check_valid_input(x)?;
        let quadratic = x.dot(&self.gram.dot(x));
        let linear = self.a_t_b.dot(x);
        Ok(0.5 * (quadratic - 2.0 * linear + self.b_t_b))
    }

    fn check_valid_input(&self, x: &Point) -> Result<(), ObjectiveError> {
        InputError::check_length(self.num_features(), x.len())?;
        Ok(())
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective> {
        Some(self)
    }
}

impl DifferentiableObjective for LeastSquaresObjective {
    fn gradient(&self, x: &Point) -> Result<Array1<f64>, ObjectiveError> {
        self.check_valid_input(x)?;
        Ok(self.gram.dot(x) - &self.a_t_b)
    }

    fn hessian(&self, x: &Point) -> Result<Array2<f64>, ObjectiveError> {
        self.check_valid_input(x)?;
        Ok(self.gram.clone())
    }
}
