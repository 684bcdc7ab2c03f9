//! Error types for the dataset pipeline.
//!
//! ```text
//! PipelineError
//! ├── ParseError    (malformed CSV row, fatal for its file)
//! ├── RangeError    (invalid validation fraction)
//! ├── DatasetError  (empty corpus, shape mismatches)
//! ├── ConfigError   (config loading / validation)
//! ├── Io / Json
//! ```

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Convenient `Result` alias for pipeline-level functions.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A CSV row that could not be turned into a sample.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The row has fewer fields than the schema requires.
    #[error("{path:?} line {line}: expected {expected} fields, found {found}")]
    MissingFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A numeric field failed to convert.
    #[error("{path:?} line {line}: field {field} ({name}) is not a number: {value:?}")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        field: usize,
        name: &'static str,
        value: String,
    },

    /// The CSV reader itself failed (I/O or malformed quoting).
    #[error("{path:?}: CSV read failed: {message}")]
    Csv { path: PathBuf, message: String },
}

impl ParseError {
    /// Path of the file the failing row came from.
    pub fn path(&self) -> &PathBuf {
        match self {
            ParseError::MissingFields { path, .. }
            | ParseError::InvalidNumber { path, .. }
            | ParseError::Csv { path, .. } => path,
        }
    }
}

/// Validation split fraction outside the accepted range.
#[derive(Debug, Clone, Error)]
#[error("validation fraction {fraction} must be in [0, 1] (rounded percent: {percent})")]
pub struct RangeError {
    pub fraction: f64,
    pub percent: f64,
}

/// Errors raised while building or addressing the dataset.
#[derive(Debug, Clone, Error)]
pub enum DatasetError {
    /// No feature records were produced across the whole corpus.
    #[error("no feature windows were produced; nothing to index")]
    EmptyDataset,

    /// A label was looked up that is not part of the label set.
    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    /// A one-hot vector does not match the label set width.
    #[error("one-hot width {actual} does not match label count {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Index out of bounds when addressing samples.
    #[error("index {index} is out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A partition built for a dataset of a different length.
    #[error("partition covers {actual} samples but the dataset has {expected}")]
    PartitionMismatch { expected: usize, actual: usize },
}

/// Top-level error for orchestration functions.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A worker thread panicked while extracting a file.
    #[error("extraction worker failed: {0}")]
    Worker(String),
}
