//! Run-level processing log.
//!
//! Counts what the pipeline did with every file and row so the composition
//! of a dataset can be audited after the fact, in particular which files were
//! skipped and why.

use crate::core::windowing::FileStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Processing statistics for one run.
#[derive(Debug)]
pub struct ProcessingLog {
    /// Number of logs found by the scanner
    files_discovered: AtomicU64,
    /// Number of logs windowed successfully
    files_processed: AtomicU64,
    /// Number of logs skipped after a parse failure
    files_skipped: AtomicU64,
    /// Data rows read across processed files
    rows_read: AtomicU64,
    /// Rows removed by the trim policy
    rows_trimmed: AtomicU64,
    /// Rows that reached a window buffer
    rows_kept: AtomicU64,
    /// Windows emitted
    windows_emitted: AtomicU64,
    /// Rows lost in partial trailing windows
    samples_dropped: AtomicU64,
    /// Per-file outcomes in corpus order
    files: Mutex<Vec<FileReport>>,
    /// Run start time
    started_at: DateTime<Utc>,
}

impl ProcessingLog {
    pub fn new() -> Self {
        Self {
            files_discovered: AtomicU64::new(0),
            files_processed: AtomicU64::new(0),
            files_skipped: AtomicU64::new(0),
            rows_read: AtomicU64::new(0),
            rows_trimmed: AtomicU64::new(0),
            rows_kept: AtomicU64::new(0),
            windows_emitted: AtomicU64::new(0),
            samples_dropped: AtomicU64::new(0),
            files: Mutex::new(Vec::new()),
            started_at: Utc::now(),
        }
    }

    /// Record the scanner's result.
    pub fn record_discovered(&self, count: usize) {
        self.files_discovered
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a file that was windowed.
    pub fn record_file(&self, path: &Path, stats: &FileStats) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
        self.rows_read.fetch_add(stats.data_rows, Ordering::Relaxed);
        self.rows_trimmed
            .fetch_add(stats.trimmed_rows, Ordering::Relaxed);
        self.rows_kept.fetch_add(stats.kept_rows, Ordering::Relaxed);
        self.windows_emitted
            .fetch_add(stats.windows as u64, Ordering::Relaxed);
        self.samples_dropped
            .fetch_add(stats.dropped_samples, Ordering::Relaxed);

        self.push(FileReport {
            path: path.to_path_buf(),
            outcome: FileOutcome::Processed(*stats),
        });
    }

    /// Record a file that was left out of the dataset.
    pub fn record_skipped(&self, path: &Path, reason: &str) {
        self.files_skipped.fetch_add(1, Ordering::Relaxed);
        self.push(FileReport {
            path: path.to_path_buf(),
            outcome: FileOutcome::Skipped {
                reason: reason.to_string(),
            },
        });
    }

    fn push(&self, report: FileReport) {
        // a poisoned lock only means another recorder panicked; keep its data
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.push(report);
    }

    /// Per-file outcomes recorded so far.
    pub fn files(&self) -> Vec<FileReport> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Get the current statistics.
    pub fn stats(&self) -> ProcessingStats {
        ProcessingStats {
            files_discovered: self.files_discovered.load(Ordering::Relaxed),
            files_processed: self.files_processed.load(Ordering::Relaxed),
            files_skipped: self.files_skipped.load(Ordering::Relaxed),
            rows_read: self.rows_read.load(Ordering::Relaxed),
            rows_trimmed: self.rows_trimmed.load(Ordering::Relaxed),
            rows_kept: self.rows_kept.load(Ordering::Relaxed),
            windows_emitted: self.windows_emitted.load(Ordering::Relaxed),
            samples_dropped: self.samples_dropped.load(Ordering::Relaxed),
            started_at: self.started_at,
            elapsed_ms: (Utc::now() - self.started_at).num_milliseconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Processing Statistics:\n\
             - Files discovered: {}\n\
             - Files processed: {}\n\
             - Files skipped: {}\n\
             - Rows read: {}\n\
             - Rows trimmed: {}\n\
             - Rows windowed: {}\n\
             - Windows emitted: {}\n\
             - Rows dropped in partial windows: {}\n\
             - Elapsed: {} ms",
            stats.files_discovered,
            stats.files_processed,
            stats.files_skipped,
            stats.rows_read,
            stats.rows_trimmed,
            stats.rows_kept,
            stats.windows_emitted,
            stats.samples_dropped,
            stats.elapsed_ms
        )
    }

    /// Write the statistics and per-file outcomes as JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let persisted = PersistedReport {
            stats: self.stats(),
            files: self.files(),
            written_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;

        std::fs::write(path, json)
    }
}

impl Default for ProcessingLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of processing statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub files_discovered: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub rows_read: u64,
    pub rows_trimmed: u64,
    pub rows_kept: u64,
    pub windows_emitted: u64,
    pub samples_dropped: u64,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    Processed(FileStats),
    Skipped { reason: String },
}

/// Report format on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedReport {
    pub stats: ProcessingStats,
    pub files: Vec<FileReport>,
    pub written_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(windows: usize) -> FileStats {
        FileStats {
            data_rows: 35,
            trimmed_rows: 15,
            kept_rows: 20,
            windows,
            dropped_samples: 0,
        }
    }

    #[test]
    fn test_processing_log_counting() {
        let log = ProcessingLog::new();
        log.record_discovered(3);
        log.record_file(Path::new("a.csv"), &stats(2));
        log.record_file(Path::new("b.csv"), &stats(2));
        log.record_skipped(Path::new("c.csv"), "bad row");

        let stats = log.stats();
        assert_eq!(stats.files_discovered, 3);
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.rows_read, 70);
        assert_eq!(stats.rows_trimmed, 30);
        assert_eq!(stats.windows_emitted, 4);

        let files = log.files();
        assert_eq!(files.len(), 3);
        assert_eq!(
            files[2].outcome,
            FileOutcome::Skipped {
                reason: "bad row".into()
            }
        );
    }

    #[test]
    fn test_summary_format() {
        let log = ProcessingLog::new();
        let summary = log.summary();

        assert!(summary.contains("Files discovered"));
        assert!(summary.contains("Files skipped"));
        assert!(summary.contains("Windows emitted"));
    }

    #[test]
    fn test_save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let log = ProcessingLog::new();
        log.record_file(Path::new("a.csv"), &stats(1));
        log.save(&path).unwrap();

        let persisted: PersistedReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(persisted.stats.windows_emitted, 1);
        assert_eq!(persisted.files.len(), 1);
    }
}
