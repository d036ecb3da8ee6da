//! Core traits and types for grasp-selection objectives.
//!
//! This crate defines the shared abstractions that concrete objectives and
//! external solvers build on:
//!
//! - [`Objective`]: scores a point after validating it
//! - [`DifferentiableObjective`]: an objective that also supplies a gradient
//!   and hessian
//! - [`Sampleable`]: a data point that can draw a stochastic success/failure
//! - [`MaximizationObjective`], [`MinimizationObjective`]: direction adapters
//!   over any objective
//! - [`NonDeterministicObjective`]: evaluates a deterministic objective on a
//!   sampled realization of its input
//!
//! Solvers are assumed to maximize, so every objective reports a score where
//! larger is better.

mod error;
mod nondeterministic;
mod objective;

pub mod direction;

pub use direction::{
    Directed, Goal, Maximize, MaximizationObjective, MinimizationObjective, Minimize,
};
pub use error::{ConfigError, InputError, ObjectiveError};
pub use nondeterministic::NonDeterministicObjective;
pub use objective::{DifferentiableObjective, Objective, Point, Sampleable};
