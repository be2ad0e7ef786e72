use std::io;
use std::path::{Path, PathBuf};

/// Every way loading or splitting an IDX dataset can fail.
///
/// A failed read abandons the whole file: the loader never keeps a partially
/// read collection around, so the caller can report the error and retry with
/// a different path without cleaning anything up.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The file could not be opened because it does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure while opening or reading.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file ended inside its header.
    #[error(
        "{}: header truncated at word {word} (header has {expected_words} words)",
        path.display()
    )]
    TruncatedHeader {
        path: PathBuf,
        word: usize,
        expected_words: usize,
    },

    /// The header declares dimensions that cannot describe any sample data:
    /// zero-sized samples, or a total size that overflows `usize`.
    #[error(
        "{}: unusable header dimensions: {samples} samples of {rows}x{cols}",
        path.display()
    )]
    InvalidDimensions {
        path: PathBuf,
        samples: usize,
        rows: usize,
        cols: usize,
    },

    /// The feature file ended before the header's sample count was reached.
    #[error(
        "{}: feature data truncated at sample {sample}, byte {offset} of {sample_size}",
        path.display()
    )]
    TruncatedSample {
        path: PathBuf,
        sample: usize,
        offset: usize,
        sample_size: usize,
    },

    /// The label file ended before the header's label count was reached.
    #[error("{}: label data truncated at label {index} of {declared}", path.display())]
    TruncatedLabels {
        path: PathBuf,
        index: usize,
        declared: usize,
    },

    /// The label file declares more labels than there are loaded records.
    #[error("label file declares {labels} labels but only {records} records are loaded")]
    LabelCountExceedsRecords { labels: usize, records: usize },

    /// The label file declares fewer labels than there are loaded records.
    #[error("count mismatch: {records} records vs {labels} labels")]
    CountMismatch { records: usize, labels: usize },

    /// Strict mode: the magic number does not identify the expected IDX file kind.
    #[error("{}: invalid magic: expected {expected:#010x}, got {got:#010x}", path.display())]
    InvalidMagic {
        path: PathBuf,
        expected: u32,
        got: u32,
    },

    /// Split percentages are out of range.
    #[error("invalid split: train={train}, test={test} (each must be in [0, 1] and sum to at most 1)")]
    InvalidSplit { train: f64, test: f64 },

    /// Reading or writing a JSON configuration file failed.
    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    /// Classifies an open/read error, turning `NotFound` into `FileNotFound`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DataError::FileNotFound { path: path.to_path_buf() }
        } else {
            DataError::Io { path: path.to_path_buf(), source }
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
