use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Returns `(train, test, validation)` sizes for `total` records.
///
/// Train and test sizes are truncated; validation takes whatever is left, so
/// the three always sum to `total`.
pub fn split_sizes(total: usize, train_percent: f64, test_percent: f64) -> (usize, usize, usize) {
    let train = ((total as f64 * train_percent) as usize).min(total);
    let test = ((total as f64 * test_percent) as usize).min(total - train);
    (train, test, total - train - test)
}

/// Shuffles `items` in place. `Some(seed)` gives a reproducible permutation,
/// `None` draws fresh entropy.
pub fn shuffle<T>(items: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            items.shuffle(&mut rng);
        }
        None => {
            let mut rng = StdRng::from_entropy();
            items.shuffle(&mut rng);
        }
    }
}

/// Contiguous index ranges of the three subsets over the shuffled collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitRanges {
    pub train: Range<usize>,
    pub test: Range<usize>,
    pub validation: Range<usize>,
}

impl SplitRanges {
    pub fn from_sizes(train: usize, test: usize, validation: usize) -> SplitRanges {
        let test_end = train + test;
        SplitRanges {
            train: 0..train,
            test: train..test_end,
            validation: test_end..test_end + validation,
        }
    }

    /// Total number of records covered.
    pub fn len(&self) -> usize {
        self.validation.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
