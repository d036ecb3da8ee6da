use grasp_core::ConfigError;
use rand::Rng;
use tracing::trace;

/// Number of rows drawn for one stochastic estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(usize);

impl Default for BatchSize {
    fn default() -> Self {
        Self(1)
    }
}

impl BatchSize {
    /// Creates a validated batch size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BatchSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::BatchSize);
        }
        Ok(Self(size))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Draws the row indices of one mini-batch.
///
/// The batch is built in two steps: every row index is repeated in order for
/// `batch_size / num_rows` whole passes, then `batch_size % num_rows` indices
/// are drawn uniformly with replacement. The result always has exactly
/// `batch_size` entries.
///
/// Returns an empty batch when `num_rows` is zero.
pub fn sample_indices<R: Rng>(num_rows: usize, batch_size: BatchSize, rng: &mut R) -> Vec<usize> {
    if num_rows == 0 {
        return Vec::new();
    }

    let passes = batch_size.get() / num_rows;
    let remainder = batch_size.get() % num_rows;

    let mut indices = Vec::with_capacity(batch_size.get());
    for _ in 0..passes {
        indices.extend(0..num_rows);
    }
    indices.extend((0..remainder).map(|_| rng.random_range(0..num_rows)));

    trace!(num_rows, passes, remainder, "sampled mini-batch");
    indices
}
