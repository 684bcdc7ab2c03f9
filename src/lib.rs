//! Activity Dataset - windowed features from labelled motion-sensor logs.
//!
//! This library turns a tree of `;`-delimited accelerometer / gyroscope /
//! gravity logs into a small, fully deterministic training dataset for an
//! activity classifier.
//!
//! # Guarantees
//!
//! - **Fixed windows**: every record summarizes exactly ten usable rows of one file
//! - **Trimmed edges**: settling and cool-down rows at both ends of a log are dropped
//! - **Stable labels**: class indices follow first-occurrence order, never hash order
//! - **Reproducible split**: train/validation assignment depends only on record position
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Activity Dataset                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Scanner   │──▶│ Row Parser  │──▶│ Trim Policy │       │
//! │  │  (ingest)   │   │  (ingest)   │   │   (core)    │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │                                             │              │
//! │                                             ▼              │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │ Partitioner │◀──│Label Indexer│◀──│  Windowing  │       │
//! │  │   (core)    │   │   (core)    │   │   (core)    │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │                                                  │
//! │         ▼                                                  │
//! │  ┌─────────────┐   ┌─────────────┐                         │
//! │  │   Export    │   │   Trainer   │                         │
//! │  │ (json/jsonl)│   │ (external)  │                         │
//! │  └─────────────┘   └─────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use activity_dataset::{pipeline, Config, ProcessingLog};
//!
//! let config = Config::default();
//! let log = ProcessingLog::new();
//! let prepared = pipeline::prepare(&config, &log).expect("dataset");
//!
//! let split = prepared.split().expect("views");
//! println!("{} training / {} validation", split.training.len(), split.validation.len());
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod trainer;

// Re-export key types at crate root for convenience
pub use config::{Config, FailurePolicy, WindowingConfig};
pub use core::{
    Dataset, DatasetView, FeatureRecord, FileCursor, LabelSet, Partition, Split, Subset,
    TrimPolicy, WindowSettings, WINDOW_SIZE,
};
pub use error::{DatasetError, ParseError, PipelineError, PipelineResult, RangeError};
pub use export::{write_dataset, ExportFormat};
pub use ingest::{scan, Axis3, RawSample};
pub use pipeline::{prepare, PreparedDataset};
pub use report::ProcessingLog;
pub use trainer::{train_and_export, ModelArtifact, TrainedModel, Trainer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
