//! Configuration for the dataset builder.

use crate::error::RangeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration for a dataset build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory scanned for sensor logs
    pub source_dir: PathBuf,

    /// Directory the dataset and report are written to
    pub output_dir: PathBuf,

    /// File name of the exported dataset inside `output_dir`
    pub dataset_file: String,

    /// Fraction of records routed to the validation subset
    pub validation_fraction: f64,

    /// Window size and trim margins
    pub windowing: WindowingConfig,

    /// What to do when a file fails to parse
    pub failure_policy: FailurePolicy,

    /// Also compute gyroscope and gravity magnitudes per window
    pub auxiliary_magnitudes: bool,

    /// Number of extraction threads (1 = sequential)
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("raw_data"),
            output_dir: PathBuf::from("processed"),
            dataset_file: "dataset.json".to_string(),
            validation_fraction: 0.2,
            windowing: WindowingConfig::default(),
            failure_policy: FailurePolicy::Abort,
            auxiliary_magnitudes: false,
            workers: 1,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to the given file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the default configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("activity-dataset")
            .join("config.json")
    }

    /// Full path of the exported dataset.
    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(&self.dataset_file)
    }

    /// Full path of the processing report written next to the dataset.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("report.json")
    }

    /// Reject settings that would make a run meaningless.
    ///
    /// Runs before any file is read, so a bad split fraction never costs a
    /// corpus scan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::core::partition::validation_percent(self.validation_fraction)?;

        if self.windowing.window_size == 0 {
            return Err(ConfigError::Invalid("window_size must be at least 1".into()));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Ensure the output directory exists.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Window size and settling / cool-down margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowingConfig {
    /// Kept rows per emitted window
    pub window_size: usize,
    /// Lines discarded at the start of a file, header included
    pub lead_trim: u64,
    /// Distance from the last line inside which rows are discarded
    pub tail_trim: u64,
}

impl Default for WindowingConfig {
    fn default() -> Self {
        Self {
            window_size: crate::core::WINDOW_SIZE,
            lead_trim: 10,
            tail_trim: 5,
        }
    }
}

/// How a file that fails to parse affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run on the first bad file.
    #[default]
    Abort,
    /// Log a warning, record the file as skipped, continue.
    Skip,
}

impl FailurePolicy {
    pub fn from_flag(skip_bad_files: bool) -> Self {
        if skip_bad_files {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("{0}")]
    Range(#[from] RangeError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
