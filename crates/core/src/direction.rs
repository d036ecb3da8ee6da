//! Direction adapters over any objective.
//!
//! Solvers maximize. [`MaximizationObjective`] passes its objective through
//! unchanged and exists for symmetry; [`MinimizationObjective`] negates the
//! score and, when the wrapped objective is differentiable, its derivatives.
//!
//! Both are aliases of [`Directed`], which is generic over a zero-sized
//! [`Goal`] marker.

use std::marker::PhantomData;

use ndarray::{Array1, Array2};

use crate::{DifferentiableObjective, Objective, ObjectiveError};

/// Defines the optimization direction of a wrapped objective.
pub trait Goal {
    /// Transforms a value reported by the wrapped objective.
    ///
    /// - [`Maximize`]: returns the value unchanged
    /// - [`Minimize`]: negates the value
    fn transform(value: f64) -> f64;
}

/// Maximize the wrapped objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Maximize;

impl Goal for Maximize {
    #[inline]
    fn transform(value: f64) -> f64 {
        value
    }
}

/// Minimize the wrapped objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimize;

impl Goal for Minimize {
    #[inline]
    fn transform(value: f64) -> f64 {
        -value
    }
}

/// An objective reoriented toward a [`Goal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directed<O, G> {
    inner: O,
    goal: PhantomData<G>,
}

/// Maximizes the wrapped objective as-is.
pub type MaximizationObjective<O> = Directed<O, Maximize>;

/// Minimizes the wrapped objective by maximizing its negation.
pub type MinimizationObjective<O> = Directed<O, Minimize>;

impl<O, G: Goal> Directed<O, G> {
    /// Wraps an objective.
    ///
    /// Any `O` is accepted here. The adapter only implements [`Objective`]
    /// for inputs `O` itself accepts, so wrapping a non-objective fails to
    /// compile where the adapter is used as one.
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            goal: PhantomData,
        }
    }

    /// Returns the wrapped objective.
    #[must_use]
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Consumes the adapter, returning the wrapped objective.
    #[must_use]
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<X, O, G> Objective<X> for Directed<O, G>
where
    X: ?Sized,
    O: Objective<X>,
    G: Goal,
{
    fn evaluate(&self, x: &X) -> Result<f64, ObjectiveError> {
        self.inner.evaluate(x).map(G::transform)
    }

    fn check_valid_input(&self, x: &X) -> Result<(), ObjectiveError> {
        self.inner.check_valid_input(x)
    }

    fn as_differentiable(&self) -> Option<&dyn DifferentiableObjective<X>> {
        self.inner
            .as_differentiable()
            .map(|_| self as &dyn DifferentiableObjective<X>)
    }
}

impl<X, O, G> DifferentiableObjective<X> for Directed<O, G>
where
    X: ?Sized,
    O: Objective<X>,
    G: Goal,
{
    fn gradient(&self, x: &X) -> Result<Array1<f64>, ObjectiveError> {
        let inner = self
            .inner
            .as_differentiable()
            .ok_or(ObjectiveError::NonDifferentiable)?;
        inner.gradient(x).map(|g| g.mapv_into(G::transform))
    }

    fn hessian(&self, x: &X) -> Result<Array2<f64>, ObjectiveError> {
        let inner = self
            .inner
            .as_differentiable()
            .ok_or(ObjectiveError::NonDifferentiable)?;
        inner.hessian(x).map(|h| h.mapv_into(G::transform))
    }
}
