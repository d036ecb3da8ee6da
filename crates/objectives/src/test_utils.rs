use grasp_core::Point;
use ndarray::{Array1, Array2};
use rand::Rng;

/// Central-difference gradient of `f` at `x`.
pub(crate) fn numerical_gradient(f: impl Fn(&Point) -> f64, x: &Point, h: f64) -> Array1<f64> {
    let mut grad = Array1::zeros(x.len());
    for i in 0..x.len() {
        let mut forward = x.clone();
        forward[i] += h;
        let mut backward = x.clone();
        backward[i] -= h;
        grad[i] = (f(&forward) - f(&backward)) / (2.0 * h);
    }
    grad
}

pub(crate) fn random_matrix(rng: &mut impl Rng, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |_| rng.random_range(-1.0..1.0))
}

pub(crate) fn random_vector(rng: &mut impl Rng, len: usize) -> Array1<f64> {
    Array1::from_shape_fn(len, |_| rng.random_range(-1.0..1.0))
}
