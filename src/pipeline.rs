//! End-to-end dataset preparation.
//!
//! ```text
//! scan ──▶ extract (per file) ──▶ label index ──▶ partition
//! ```
//!
//! Extraction runs sequentially or on a small pool of scoped threads. Either
//! way the records are assembled in scan order, so labels and partitions do
//! not depend on the worker count.

use crate::config::{Config, FailurePolicy};
use crate::core::dataset::{Dataset, Split};
use crate::core::features::FeatureRecord;
use crate::core::partition::{validation_percent, Partition};
use crate::core::windowing::{extract_file, FileExtraction, WindowSettings};
use crate::error::{DatasetError, ParseError, PipelineError, PipelineResult};
use crate::ingest::scanner::scan;
use crate::report::ProcessingLog;
use crossbeam_channel::unbounded;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, info, warn};

/// A fully prepared dataset, ready for export or training.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Files in scan order
    pub files: Vec<PathBuf>,
    /// Records in corpus order
    pub records: Vec<FeatureRecord>,
    /// Encoded samples and their labels
    pub dataset: Dataset,
    /// Train/validation assignment of every sample
    pub partition: Partition,
}

impl PreparedDataset {
    /// Training and validation views over the dataset.
    pub fn split(&self) -> Result<Split<'_>, DatasetError> {
        self.dataset.split_with(self.partition.clone())
    }
}

/// Run the whole pipeline described by `config`.
///
/// The configuration is validated before the source tree is touched, so an
/// invalid split fraction fails fast.
pub fn prepare(config: &Config, log: &ProcessingLog) -> PipelineResult<PreparedDataset> {
    let percent = validation_percent(config.validation_fraction)?;
    config.validate()?;

    let files = scan(&config.source_dir);
    log.record_discovered(files.len());
    info!(source = ?config.source_dir, files = files.len(), "scanned source directory");

    let records = extract_corpus(&files, config, log)?;
    let dataset = Dataset::from_records(&records)?;
    let partition = Partition::new(dataset.len(), percent);

    info!(
        records = dataset.len(),
        labels = ?dataset.labels().labels(),
        training = partition.training.len(),
        validation = partition.validation.len(),
        "dataset prepared"
    );

    Ok(PreparedDataset {
        files,
        records,
        dataset,
        partition,
    })
}

/// Window every file and concatenate the records in file order.
pub fn extract_corpus(
    files: &[PathBuf],
    config: &Config,
    log: &ProcessingLog,
) -> PipelineResult<Vec<FeatureRecord>> {
    let settings = WindowSettings::from_config(&config.windowing, config.auxiliary_magnitudes);

    let results = if config.workers > 1 && files.len() > 1 {
        extract_parallel(files, settings, config.workers)?
    } else {
        files
            .iter()
            .enumerate()
            .map(|(index, path)| extract_file(path, index, settings))
            .collect()
    };

    let mut records = Vec::new();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(extraction) => {
                log.record_file(path, &extraction.stats);
                records.extend(extraction.records);
            }
            Err(e) => match config.failure_policy {
                FailurePolicy::Abort => return Err(e.into()),
                FailurePolicy::Skip => {
                    warn!(file = ?path, error = %e, "skipping file");
                    log.record_skipped(path, &e.to_string());
                }
            },
        }
    }

    Ok(records)
}

type Extraction = Result<FileExtraction, ParseError>;

/// Extract files on `workers` scoped threads; results come back in file order.
fn extract_parallel(
    files: &[PathBuf],
    settings: WindowSettings,
    workers: usize,
) -> PipelineResult<Vec<Extraction>> {
    let (job_tx, job_rx) = unbounded::<(usize, &PathBuf)>();
    let (result_tx, result_rx) = unbounded::<(usize, Extraction)>();

    for job in files.iter().enumerate() {
        // receivers outlive this loop, so the send cannot fail
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let workers = workers.min(files.len());
    debug!(workers, files = files.len(), "extracting in parallel");

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                scope.spawn(move || {
                    for (index, path) in jobs.iter() {
                        let _ = results.send((index, extract_file(path, index, settings)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .map_err(|_| PipelineError::Worker("extraction thread panicked".into()))?;
        }
        Ok::<(), PipelineError>(())
    })?;
    drop(result_tx);

    let mut slots: Vec<Option<Extraction>> = (0..files.len()).map(|_| None).collect();
    for (index, result) in result_rx.iter() {
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| PipelineError::Worker(format!("no result for file {index}")))
        })
        .collect()
}
