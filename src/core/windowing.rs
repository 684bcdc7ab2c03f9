//! Fixed-count windowing of the rows of one sensor log.
//!
//! Each file gets its own [`FileCursor`]. Kept rows are appended to per-axis
//! buffers; once `window_size` rows have accumulated a [`FeatureRecord`] is
//! emitted and the buffers are reset. Windows never cross files and a partial
//! trailing window is dropped when the cursor is finished.

use crate::config::WindowingConfig;
use crate::core::features::{AuxiliaryMagnitudes, AxisBuffer, FeatureRecord};
use crate::core::trim::TrimPolicy;
use crate::error::ParseError;
use crate::ingest::parser::{count_data_rows, csv_error, open_log, parse_record};
use crate::ingest::types::RawSample;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows per emitted window.
pub const WINDOW_SIZE: usize = 10;

/// Settings shared by every cursor of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    pub window_size: usize,
    pub trim: TrimPolicy,
    /// Compute gyroscope and gravity magnitudes alongside the accelerometer
    pub auxiliary_magnitudes: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            trim: TrimPolicy::default(),
            auxiliary_magnitudes: false,
        }
    }
}

impl WindowSettings {
    pub fn from_config(windowing: &WindowingConfig, auxiliary_magnitudes: bool) -> Self {
        Self {
            window_size: windowing.window_size,
            trim: TrimPolicy::from(windowing),
            auxiliary_magnitudes,
        }
    }
}

/// What happened to a row handed to the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Inside a trim margin; never reached the buffers.
    Trimmed,
    /// Buffered; the window is not full yet.
    Buffered,
    /// Completed a window.
    Emitted(FeatureRecord),
}

/// Per-file accumulation state.
#[derive(Debug)]
pub struct FileCursor {
    settings: WindowSettings,
    file_index: usize,
    total_lines: u64,
    /// Physical line of the last row seen; the header is line 1
    line: u64,
    accel: AxisBuffer,
    gyro: AxisBuffer,
    gravity: AxisBuffer,
    stats: FileStats,
}

impl FileCursor {
    /// Start a cursor for a file with `data_rows` rows after its header.
    pub fn new(file_index: usize, data_rows: u64, settings: WindowSettings) -> Self {
        let capacity = settings.window_size;
        Self {
            settings,
            file_index,
            total_lines: data_rows + 1,
            line: 1,
            accel: AxisBuffer::with_capacity(capacity),
            gyro: AxisBuffer::with_capacity(capacity),
            gravity: AxisBuffer::with_capacity(capacity),
            stats: FileStats {
                data_rows,
                ..FileStats::default()
            },
        }
    }

    /// Number of rows currently buffered toward the next window.
    pub fn fill(&self) -> usize {
        self.accel.len()
    }

    /// Feed the next data row of the file.
    pub fn advance(&mut self, sample: RawSample) -> RowOutcome {
        self.line += 1;

        if !self.settings.trim.keeps(self.line, self.total_lines) {
            self.stats.trimmed_rows += 1;
            return RowOutcome::Trimmed;
        }
        self.stats.kept_rows += 1;

        self.accel.push(sample.accel);
        if self.settings.auxiliary_magnitudes {
            self.gyro.push(sample.gyro);
            self.gravity.push(sample.gravity);
        }

        if self.accel.len() < self.settings.window_size {
            return RowOutcome::Buffered;
        }

        RowOutcome::Emitted(self.emit(sample.label))
    }

    fn emit(&mut self, label: String) -> FeatureRecord {
        let auxiliary = self.settings.auxiliary_magnitudes.then(|| AuxiliaryMagnitudes {
            gyro_magnitude_of_means: self.gyro.magnitude_of_means(),
            gravity_magnitude_of_means: self.gravity.magnitude_of_means(),
        });

        let record = FeatureRecord {
            accel_magnitude_of_means: self.accel.magnitude_of_means(),
            accel_magnitude_of_maxes: self.accel.magnitude_of_maxes(),
            label,
            file_index: self.file_index,
            window_index: self.stats.windows,
            auxiliary,
        };

        self.accel.clear();
        self.gyro.clear();
        self.gravity.clear();
        self.stats.windows += 1;

        record
    }

    /// Close the file, dropping any partial window.
    pub fn finish(mut self) -> FileStats {
        self.stats.dropped_samples = self.accel.len() as u64;
        self.stats
    }
}

/// Row and window counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Rows after the header
    pub data_rows: u64,
    /// Rows discarded by the trim policy
    pub trimmed_rows: u64,
    /// Rows that reached the buffers
    pub kept_rows: u64,
    /// Windows emitted
    pub windows: usize,
    /// Rows left in a partial trailing window
    pub dropped_samples: u64,
}

/// Everything extracted from one file.
#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub path: PathBuf,
    pub file_index: usize,
    pub records: Vec<FeatureRecord>,
    pub stats: FileStats,
}

/// Window every row of one log.
///
/// The file is read twice: once to count its rows for the tail margin, once
/// to stream the rows through a fresh cursor. Any unparsable row fails the
/// whole file.
pub fn extract_file(
    path: &Path,
    file_index: usize,
    settings: WindowSettings,
) -> Result<FileExtraction, ParseError> {
    let data_rows = count_data_rows(path)?;
    let mut cursor = FileCursor::new(file_index, data_rows, settings);
    let mut records = Vec::new();

    let mut reader = open_log(path)?;
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let sample = parse_record(&record, path, cursor.line + 1)?;

        if let RowOutcome::Emitted(feature) = cursor.advance(sample) {
            debug!(
                file = ?path,
                window = feature.window_index,
                label = %feature.label,
                "window emitted"
            );
            records.push(feature);
        }
    }

    let stats = cursor.finish();
    info!(
        file = ?path,
        rows = stats.data_rows,
        kept = stats.kept_rows,
        windows = stats.windows,
        "Processed {} lines",
        stats.data_rows
    );

    Ok(FileExtraction {
        path: path.to_path_buf(),
        file_index,
        records,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::Axis3;

    fn sample(accel: (f64, f64, f64), label: &str) -> RawSample {
        RawSample {
            timestamp_millis: 0,
            accel: Axis3::new(accel.0, accel.1, accel.2),
            gyro: Axis3::new(0.0, 0.0, 2.0),
            gravity: Axis3::new(0.0, 9.0, 0.0),
            label: label.to_string(),
        }
    }

    fn run(data_rows: u64, settings: WindowSettings) -> (Vec<FeatureRecord>, FileStats) {
        let mut cursor = FileCursor::new(0, data_rows, settings);
        let mut records = Vec::new();
        for _ in 0..data_rows {
            if let RowOutcome::Emitted(r) = cursor.advance(sample((1.0, 0.0, 0.0), "walk")) {
                records.push(r);
            }
        }
        (records, cursor.finish())
    }

    #[test]
    fn test_window_counts() {
        let settings = WindowSettings::default();
        for (rows, expected) in [(0, 0), (15, 0), (16, 0), (24, 0), (25, 1), (30, 1), (35, 2), (45, 3)] {
            let (records, stats) = run(rows, settings);
            assert_eq!(records.len(), expected, "rows = {rows}");
            assert_eq!(stats.windows, expected);
        }
    }

    #[test]
    fn test_partial_window_dropped() {
        let (records, stats) = run(32, WindowSettings::default());
        assert_eq!(records.len(), 1);
        assert_eq!(stats.kept_rows, 17);
        assert_eq!(stats.trimmed_rows, 15);
        assert_eq!(stats.dropped_samples, 7);
    }

    #[test]
    fn test_label_comes_from_last_row() {
        let settings = WindowSettings {
            trim: TrimPolicy::new(1, 0),
            ..WindowSettings::default()
        };
        // 11 data rows: total 12 lines, line 12 is trimmed, lines 2..=11 kept
        let mut cursor = FileCursor::new(3, 11, settings);
        let mut emitted = None;
        for i in 0..10 {
            let label = if i == 9 { "run" } else { "walk" };
            if let RowOutcome::Emitted(r) = cursor.advance(sample((0.0, 1.0, 0.0), label)) {
                emitted = Some(r);
            }
        }
        let record = emitted.expect("window should be emitted on the tenth row");
        assert_eq!(record.label, "run");
        assert_eq!(record.file_index, 3);
        assert_eq!(record.window_index, 0);
        assert_eq!(cursor.fill(), 0);
        assert_eq!(cursor.advance(sample((0.0, 0.0, 0.0), "walk")), RowOutcome::Trimmed);
    }

    #[test]
    fn test_auxiliary_magnitudes_optional() {
        let (records, _) = run(25, WindowSettings::default());
        assert!(records[0].auxiliary.is_none());

        let settings = WindowSettings {
            auxiliary_magnitudes: true,
            ..WindowSettings::default()
        };
        let (records, _) = run(25, settings);
        let aux = records[0].auxiliary.expect("auxiliary magnitudes requested");
        assert!((aux.gyro_magnitude_of_means - 2.0).abs() < 1e-12);
        assert!((aux.gravity_magnitude_of_means - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_file_propagates_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.csv");
        let mut content = String::from("t;ax;ay;az;gx;gy;gz;grx;gry;grz;label\n");
        for i in 0..30 {
            if i == 20 {
                content.push_str("20;1;x;0;0;0;0;0;0;0;walk\n");
            } else {
                content.push_str(&format!("{i};1;0;0;0;0;0;0;0;0;walk\n"));
            }
        }
        std::fs::write(&file, content).unwrap();

        let err = extract_file(&file, 0, WindowSettings::default()).unwrap_err();
        match err {
            ParseError::InvalidNumber { line, field, .. } => {
                assert_eq!(line, 22);
                assert_eq!(field, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
