use ndarray::{Array1, Array2};

use crate::ObjectiveError;

/// A candidate point proposed by a solver.
pub type Point = Array1<f64>;

/// A scalar score to be maximized.
///
/// Implementations validate `x` with [`Objective::check_valid_input`] before
/// computing anything, and report a rejected point as
/// [`ObjectiveError::InvalidInput`].
///
/// The type parameter `X` is the input type, which defaults to [`Point`].
pub trait Objective<X: ?Sized = Point> {
    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is not a valid input for this objective.
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError>;

    /// Checks whether `x` can be evaluated by this objective.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::InvalidInput`] if `x` is not acceptable.
    fn check_valid_input(&self, x: &X) -> Result<(), ObjectiveError>;

    /// Returns this objective as a [`DifferentiableObjective`], if it is one.
    ///
    /// Adapters use this to decide at run time whether derivatives can be
    /// forwarded to the objective they wrap.
    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective<X>> {
        None
    }
}

/// An [`Objective`] that also supplies first and second derivatives.
///
/// Derivatives are only defined where [`Objective::evaluate`] would succeed,
/// so implementations run the same input check first.
pub trait DifferentiableObjective<X: ?Sized = Point>: Objective<X> {
    /// Returns the gradient at `x`, with the same dimension as `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is invalid or the gradient is unavailable.
    fn gradient(&self, x: &X) -> Result<Array1<f64>, ObjectiveError>;

    /// Returns the hessian at `x` as a square matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is invalid or the hessian is unavailable.
    fn hessian(&self, x: &X) -> Result<Array2<f64>, ObjectiveError>;
}

/// A data point whose outcome is random.
///
/// Each call draws a fresh success (`true`) or failure (`false`).
pub trait Sampleable {
    fn sample_success(&self) -> bool;
}

impl<S: Sampleable + ?Sized> Sampleable for &S {
    fn sample_success(&self) -> bool {
        (**self).sample_success()
    }
}

impl<X: ?Sized, O: Objective<X> + ?Sized> Objective<X> for &O {
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError> {
        (**self).evaluate(x)
    }

    fn check_valid_input(&self, x: &X) -> Result<(), ObjectiveError> {
        (**self).check_valid_input(x)
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective<X>> {
        (**self).as_differentiable()
    }
}

impl<X: ?Sized, O: DifferentiableObjective<X> + ?Sized> DifferentiableObjective<X> for &O {
    fn gradient(&self, x: &X) -> Result<Array1<f64>, ObjectiveError> {
        (**self).gradient(x)
    }

    fn hessian(&self, x: &X) -> Result<Array2<f64>, ObjectiveError> {
        (**self).hessian(x)
    }
}

impl<X: ?Sized, O: Objective<X> + ?Sized> Objective<X> for Box<O> {
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError> {
        (**self).evaluate(x)
    }

    fn check_valid_input(&self, x: &X) -> Result<(), ObjectiveError> {
        (**self).check_valid_input(x)
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective<X>> {
        (**self).as_differentiable()
    }
}

impl<X: ?Sized, O: DifferentiableObjective<X> + ?Sized> DifferentiableObjective<X> for Box<O> {
    fn gradient(&self, x: &X) -> Result<Array1<f64>, ObjectiveError> {
        (**self).gradient(x)
    }

    fn hessian(&self, x: &X) -> Result<Array2<f64>, ObjectiveError> {
        (**self).hessian(x)
    }
}
