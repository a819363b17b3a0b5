//! Seeded train/test partition
//!
//! Rows are assigned by shuffling the row indices with a seeded RNG and
//! cutting the permutation in two: the first `test_len(n)` indices become the
//! test subset, the rest the train subset. Both subsets keep permutation order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Dataset, IngestionError, Result};

/// Default share of rows held out for testing
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 42;

// Products like 0.2 * 35 can land a hair above an integer.
const FRACTION_EPSILON: f64 = 1e-9;

/// Randomized split into disjoint train and test datasets
///
/// # Example
///
/// ```rust
/// use stratum_domain::ingestion::{Dataset, Row, TrainTestSplit};
///
/// let dataset = Dataset::new(
///     vec!["a".to_string()],
///     (0..10).map(|i| Row::from_iter([i.to_string()])).collect(),
/// )
/// .unwrap();
///
/// let (train, test) = TrainTestSplit::default().split(&dataset).unwrap();
/// assert_eq!((train.len(), test.len()), (8, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainTestSplit {
    test_fraction: f64,
    seed: u64,
}

impl Default for TrainTestSplit {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainTestSplit {
    /// Create a splitter, rejecting fractions outside the open interval (0, 1)
    pub fn new(test_fraction: f64, seed: u64) -> Result<Self> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(IngestionError::config_error(format!(
                "test fraction must be between 0 and 1 (exclusive), got {}",
                test_fraction
            )));
        }

        Ok(Self {
            test_fraction,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rows the test subset receives out of `n`
    ///
    /// Rounds up, so any non-empty dataset yields at least one test row.
    /// Products within float noise of a positive integer snap to it.
    pub fn test_len(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }

        let raw = self.test_fraction * n as f64;
        let nearest = raw.round();
        let len = if nearest >= 1.0 && (raw - nearest).abs() < FRACTION_EPSILON {
            nearest
        } else {
            raw.ceil()
        };
        (len as usize).max(1)
    }

    /// Partition `dataset` into `(train, test)`
    ///
    /// # Errors
    ///
    /// - `IngestionError::Partition` if the dataset is empty or the train
    ///   subset would end up empty
    pub fn split(&self, dataset: &Dataset) -> Result<(Dataset, Dataset)> {
        let n = dataset.len();
        if n == 0 {
            return Err(IngestionError::partition("cannot split an empty dataset"));
        }

        let n_test = self.test_len(n);
        if n_test >= n {
            return Err(IngestionError::partition(format!(
                "with {} rows and test fraction {}, the train subset would be empty",
                n, self.test_fraction
            )));
        }

        let permutation = self.permutation(n);
        let (test_indices, train_indices) = permutation.split_at(n_test);

        Ok((dataset.select(train_indices), dataset.select(test_indices)))
    }

    fn permutation(&self, n: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);
        indices
    }
}
