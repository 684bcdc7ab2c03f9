//! Encoded dataset and its train/validation views.

use crate::core::features::{FeatureRecord, FEATURE_DIMENSION};
use crate::core::labels::LabelSet;
use crate::core::partition::{Partition, Subset};
use crate::error::{DatasetError, RangeError};
use serde::{Deserialize, Serialize};

/// One encoded sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f32; FEATURE_DIMENSION],
    pub class_index: usize,
    pub one_hot: Vec<f32>,
}

/// Ordered, index-addressable samples plus the label set that decodes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
    labels: LabelSet,
}

impl Dataset {
    /// Index the labels of `records` and encode every record.
    ///
    /// # Errors
    ///
    /// [`DatasetError::EmptyDataset`] when `records` is empty.
    pub fn from_records(records: &[FeatureRecord]) -> Result<Self, DatasetError> {
        let labels = LabelSet::from_records(records)?;

        let samples = records
            .iter()
            .map(|record| {
                let class_index = labels
                    .index_of(&record.label)
                    .ok_or_else(|| DatasetError::UnknownLabel(record.label.clone()))?;
                Ok(Sample {
                    features: record.feature_vector(),
                    class_index,
                    one_hot: labels.one_hot_index(class_index),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        Ok(Self { samples, labels })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Result<&Sample, DatasetError> {
        self.samples.get(index).ok_or(DatasetError::IndexOutOfBounds {
            index,
            len: self.samples.len(),
        })
    }

    /// Split into training and validation views.
    pub fn split(&self, validation_fraction: f64) -> Result<Split<'_>, RangeError> {
        Ok(self.views(Partition::from_fraction(self.len(), validation_fraction)?))
    }

    /// Build views from an existing partition of this dataset.
    ///
    /// The partition must cover exactly this dataset's samples.
    pub fn split_with(&self, partition: Partition) -> Result<Split<'_>, DatasetError> {
        if partition.len() != self.len() {
            return Err(DatasetError::PartitionMismatch {
                expected: self.len(),
                actual: partition.len(),
            });
        }
        Ok(self.views(partition))
    }

    fn views(&self, partition: Partition) -> Split<'_> {
        Split {
            validation_percent: partition.validation_percent,
            training: DatasetView::new(self, Subset::Training, partition.training),
            validation: DatasetView::new(self, Subset::Validation, partition.validation),
        }
    }
}

/// Training and validation views over one dataset.
#[derive(Debug, Clone)]
pub struct Split<'a> {
    pub validation_percent: u32,
    pub training: DatasetView<'a>,
    pub validation: DatasetView<'a>,
}

/// A subset of a dataset, addressed by index without copying samples.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    subset: Subset,
    indices: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    fn new(dataset: &'a Dataset, subset: Subset, indices: Vec<usize>) -> Self {
        Self {
            dataset,
            subset,
            indices,
        }
    }

    pub fn subset(&self) -> Subset {
        self.subset
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions of the view's samples in the full dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn labels(&self) -> &'a LabelSet {
        let dataset: &'a Dataset = self.dataset;
        &dataset.labels
    }

    /// Samples of the view in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Sample> + '_ {
        let dataset: &'a Dataset = self.dataset;
        let samples = &dataset.samples;
        self.indices.iter().map(move |&i| &samples[i])
    }
}
