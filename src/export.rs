//! Dataset export.
//!
//! The prepared dataset is written either as one pretty-printed JSON document
//! or as JSON Lines: a header line followed by one line per sample.

use crate::core::features::{FEATURE_DIMENSION, FEATURE_NAMES};
use crate::core::partition::Subset;
use crate::error::PipelineResult;
use crate::pipeline::PreparedDataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

/// Name of this producer, recorded in every export.
pub const PRODUCER_NAME: &str = "activity-dataset";

/// On-disk layout of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Jsonl,
}

/// Metadata describing an exported dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetHeader {
    pub producer: String,
    pub version: String,
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Feature column names, in vector order
    pub features: Vec<String>,
    /// Labels in class-index order
    pub labels: Vec<String>,
    pub validation_percent: u32,
    pub sample_count: usize,
    pub training_count: usize,
    pub validation_count: usize,
}

/// One exported sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSample {
    pub index: usize,
    pub subset: Subset,
    pub features: [f32; FEATURE_DIMENSION],
    pub class_index: usize,
    pub label: String,
    pub one_hot: Vec<f32>,
}

/// Complete JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDocument {
    #[serde(flatten)]
    pub header: DatasetHeader,
    pub samples: Vec<ExportedSample>,
}

impl DatasetDocument {
    /// Assemble the export of a prepared dataset.
    pub fn build(prepared: &PreparedDataset) -> Self {
        let dataset = &prepared.dataset;
        let labels = dataset.labels();

        let header = DatasetHeader {
            producer: PRODUCER_NAME.to_string(),
            version: crate::VERSION.to_string(),
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            labels: labels.labels().to_vec(),
            validation_percent: prepared.partition.validation_percent,
            sample_count: dataset.len(),
            training_count: prepared.partition.training.len(),
            validation_count: prepared.partition.validation.len(),
        };

        let samples = dataset
            .samples()
            .iter()
            .enumerate()
            .map(|(index, sample)| ExportedSample {
                index,
                subset: prepared.partition.subset_of(index),
                features: sample.features,
                class_index: sample.class_index,
                label: labels.label(sample.class_index).unwrap_or_default().to_string(),
                one_hot: sample.one_hot.clone(),
            })
            .collect();

        Self { header, samples }
    }

    /// Read a document written in [`ExportFormat::Json`].
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Write `prepared` to `path`, replacing any previous export.
pub fn write_dataset(
    prepared: &PreparedDataset,
    path: &Path,
    format: ExportFormat,
) -> PipelineResult<DatasetHeader> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let document = DatasetDocument::build(prepared);
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        }
        ExportFormat::Jsonl => {
            serde_json::to_writer(&mut writer, &document.header)?;
            writeln!(writer)?;
            for sample in &document.samples {
                serde_json::to_writer(&mut writer, sample)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;

    Ok(document.header)
}
