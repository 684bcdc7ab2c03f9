//! Label indexing and one-hot encoding.
//!
//! Labels are ordered by first occurrence in the record sequence, never by
//! hash iteration order, so class indices are stable for a given corpus.

use crate::core::features::FeatureRecord;
use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered set of activity labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl LabelSet {
    /// Build the label set of a record sequence.
    ///
    /// # Errors
    ///
    /// [`DatasetError::EmptyDataset`] when `records` is empty.
    pub fn from_records(records: &[FeatureRecord]) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }

        let mut set = Self::default();
        for record in records {
            set.insert(&record.label);
        }
        Ok(set)
    }

    /// Append `label` if it has not been seen yet; returns its index.
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(&index) = self.positions.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.positions.insert(label.to_string(), index);
        index
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in class-index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// One-hot vector of width `len()` for `label`.
    pub fn one_hot(&self, label: &str) -> Result<Vec<f32>, DatasetError> {
        let index = self
            .index_of(label)
            .ok_or_else(|| DatasetError::UnknownLabel(label.to_string()))?;
        Ok(self.one_hot_index(index))
    }

    pub(crate) fn one_hot_index(&self, index: usize) -> Vec<f32> {
        let mut vector = vec![0.0; self.labels.len()];
        vector[index] = 1.0;
        vector
    }

    /// Decode a one-hot (or score) vector back to its label by argmax.
    ///
    /// Ties resolve to the lowest index.
    pub fn decode(&self, vector: &[f32]) -> Result<&str, DatasetError> {
        if vector.len() != self.labels.len() || vector.is_empty() {
            return Err(DatasetError::WidthMismatch {
                expected: self.labels.len(),
                actual: vector.len(),
            });
        }

        let mut best = 0;
        for (i, &value) in vector.iter().enumerate().skip(1) {
            if value > vector[best] {
                best = i;
            }
        }
        Ok(&self.labels[best])
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        let mut set = Self::default();
        for label in &labels {
            set.insert(label);
        }
        set
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}
