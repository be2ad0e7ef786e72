use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Settings for a `DataHandler` load-and-split run.
///
/// # Fields
/// - `train_percent` — fraction of records placed in the training subset
/// - `test_percent`  — fraction placed in the test subset; validation
///                     receives the remainder
/// - `seed`          — fixed shuffle seed; `None` shuffles from fresh entropy
///                     on every split
/// - `strict`        — reject files whose magic number is wrong instead of
///                     logging a warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub train_percent: f64,
    pub test_percent: f64,
    pub seed: Option<u64>,
    pub strict: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            train_percent: 0.75,
            test_percent: 0.20,
            seed: None,
            strict: false,
        }
    }
}

impl LoaderConfig {
    /// Fraction left for the validation subset.
    pub fn validation_percent(&self) -> f64 {
        (1.0 - self.train_percent - self.test_percent).max(0.0)
    }

    /// Checks that both percentages lie in `[0, 1]` and sum to at most 1.
    pub fn validate(&self) -> Result<()> {
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        if !in_range(self.train_percent)
            || !in_range(self.test_percent)
            || self.train_percent + self.test_percent > 1.0 + 1e-9
        {
            return Err(DataError::InvalidSplit {
                train: self.train_percent,
                test: self.test_percent,
            });
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| DataError::from_io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|source| DataError::Config { path: path.to_path_buf(), source })
    }

    /// Deserializes a config from a JSON file; missing fields take their defaults.
    pub fn load_json(path: &Path) -> Result<LoaderConfig> {
        let file = File::open(path).map_err(|e| DataError::from_io(path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| DataError::Config { path: path.to_path_buf(), source })
    }
}
