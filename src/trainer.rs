//! Boundary to an external model trainer.
//!
//! The crate prepares data; fitting, evaluating and exporting a model happen
//! behind these traits. The exported artifact is opaque bytes that are never
//! inspected here.
//!
//! # Usage
//!
//! ```ignore
//! let prepared = pipeline::prepare(&config, &log)?;
//! let outcome = trainer::train_and_export(&mut my_trainer, &prepared)?;
//! std::fs::write("model.bin", outcome.artifact.bytes())?;
//! ```

use crate::core::dataset::DatasetView;
use crate::core::labels::LabelSet;
use crate::error::DatasetError;
use crate::pipeline::PreparedDataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors reported by a trainer implementation.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("training failed: {0}")]
    Fit(String),
    #[error("evaluation failed: {0}")]
    Evaluate(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Loss and accuracy on a held-out view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
}

/// Serialized, deployable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    bytes: Vec<u8>,
}

impl ModelArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A model produced by a [`Trainer`].
pub trait TrainedModel {
    /// Score the model on a validation view.
    fn evaluate(&self, validation: &DatasetView<'_>) -> Result<Evaluation, TrainerError>;

    /// Convert the model to its deployable form.
    fn export(&self) -> Result<ModelArtifact, TrainerError>;
}

/// Fits a model on a training view.
pub trait Trainer {
    type Model: TrainedModel;

    fn fit(
        &mut self,
        training: &DatasetView<'_>,
        labels: &LabelSet,
    ) -> Result<Self::Model, TrainerError>;
}

/// Result of a full training hand-off.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub evaluation: Evaluation,
    pub artifact: ModelArtifact,
    /// Labels in class-index order, for decoding predictions
    pub labels: Vec<String>,
}

/// Fit on the training view, score on the validation view, export.
pub fn train_and_export<T: Trainer>(
    trainer: &mut T,
    prepared: &PreparedDataset,
) -> Result<TrainingOutcome, TrainerError> {
    let split = prepared.split()?;
    let labels = prepared.dataset.labels();

    info!(
        training = split.training.len(),
        validation = split.validation.len(),
        classes = labels.len(),
        "handing dataset to trainer"
    );

    let model = trainer.fit(&split.training, labels)?;
    let evaluation = model.evaluate(&split.validation)?;
    info!(
        loss = evaluation.loss,
        accuracy = evaluation.accuracy,
        "model evaluated"
    );

    let artifact = model.export()?;
    info!(bytes = artifact.len(), "model exported");

    Ok(TrainingOutcome {
        evaluation,
        artifact,
        labels: labels.labels().to_vec(),
    })
}
