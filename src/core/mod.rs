//! Core windowing and dataset logic.
//!
//! This module contains:
//! - The trim policy deciding which rows of a log are usable
//! - Fixed-count windowing and per-window feature computation
//! - Label indexing and one-hot encoding
//! - Deterministic train/validation partitioning

pub mod dataset;
pub mod features;
pub mod labels;
pub mod partition;
pub mod trim;
pub mod windowing;

// Re-export commonly used types
pub use dataset::{Dataset, DatasetView, Sample, Split};
pub use features::{AuxiliaryMagnitudes, FeatureRecord, FEATURE_DIMENSION, FEATURE_NAMES};
pub use labels::LabelSet;
pub use partition::{assign, validation_percent, Partition, Subset};
pub use trim::TrimPolicy;
pub use windowing::{
    extract_file, FileCursor, FileExtraction, FileStats, RowOutcome, WindowSettings, WINDOW_SIZE,
};
