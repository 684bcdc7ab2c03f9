//! Processing report for a dataset build.
//!
//! Records which files went into the dataset, how many of their rows were
//! trimmed or windowed, and which files were skipped.

pub mod log;

// Re-export commonly used types
pub use log::{FileOutcome, FileReport, PersistedReport, ProcessingLog, ProcessingStats};
