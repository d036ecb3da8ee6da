//! Concrete objectives for grasp selection.
//!
//! Every objective here implements [`grasp_core::Objective`], and the
//! differentiable ones also implement [`grasp_core::DifferentiableObjective`],
//! so a solver written against those traits can score any of them:
//!
//! - [`ZeroOneObjective`]: thresholds a scalar
//! - [`RandomBinaryObjective`]: thresholds a random draw from a data point
//! - [`LeastSquaresObjective`]: `½‖Ax − b‖²` in closed form
//! - [`LogisticCrossEntropyObjective`] and
//!   [`StochasticLogisticCrossEntropyObjective`]: logistic regression loss,
//!   full-batch and mini-batch
//! - [`StochasticGraspWeightObjective`]: kernel-smoothed Beta-Bernoulli
//!   score over grasps with observed successes and failures

mod bernoulli;
mod least_squares;
mod logistic;
mod minibatch;
mod random_binary;
mod zero_one;

pub mod grasp_weight;

#[cfg(test)]
mod test_utils;

pub use bernoulli::BernoulliPoint;
pub use grasp_weight::{KernelConfig, SquaredExponentialKernel, StochasticGraspWeightObjective};
pub use least_squares::LeastSquaresObjective;
pub use logistic::{LogisticCrossEntropyObjective, StochasticLogisticCrossEntropyObjective};
pub use minibatch::{BatchSize, sample_indices};
pub use random_binary::RandomBinaryObjective;
pub use zero_one::ZeroOneObjective;
