//! Sensor row parsing.
//!
//! Rows are `;`-delimited with a fixed layout:
//!
//! ```text
//! 0          1..=3         4..=6        7..=9            10
//! timestamp; ax; ay; az;   gx; gy; gz;  grx; gry; grz;   label
//! ```

use crate::error::ParseError;
use crate::ingest::types::{Axis3, RawSample};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

/// Field separator used by the logger.
pub const DELIMITER: u8 = b';';

/// Number of fields every data row must carry.
pub const FIELD_COUNT: usize = 11;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "timestamp",
    "accel_x",
    "accel_y",
    "accel_z",
    "gyro_x",
    "gyro_y",
    "gyro_z",
    "gravity_x",
    "gravity_y",
    "gravity_z",
    "label",
];

/// Parse one row given as a slice of fields.
///
/// `line` is the physical line number (header = 1) used for error reporting.
/// Extra trailing fields are ignored.
pub fn parse_fields(fields: &[&str], path: &Path, line: u64) -> Result<RawSample, ParseError> {
    if fields.len() < FIELD_COUNT {
        return Err(ParseError::MissingFields {
            path: path.to_path_buf(),
            line,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let number = |field: usize| -> Result<f64, ParseError> {
        fields[field]
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(fields, path, line, field))
    };
    let axis = |first: usize| -> Result<Axis3, ParseError> {
        Ok(Axis3::new(number(first)?, number(first + 1)?, number(first + 2)?))
    };

    let timestamp_millis = fields[0]
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(fields, path, line, 0))?;

    Ok(RawSample {
        timestamp_millis,
        accel: axis(1)?,
        gyro: axis(4)?,
        gravity: axis(7)?,
        label: fields[10].to_lowercase(),
    })
}

/// Parse a raw text row.
pub fn parse_row(row: &str, path: &Path, line: u64) -> Result<RawSample, ParseError> {
    let fields: Vec<&str> = row.split(DELIMITER as char).collect();
    parse_fields(&fields, path, line)
}

/// Parse a record produced by the CSV reader.
pub fn parse_record(record: &StringRecord, path: &Path, line: u64) -> Result<RawSample, ParseError> {
    let fields: Vec<&str> = record.iter().collect();
    parse_fields(&fields, path, line)
}

fn invalid(fields: &[&str], path: &Path, line: u64, field: usize) -> ParseError {
    ParseError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        field,
        name: FIELD_NAMES[field],
        value: fields[field].to_string(),
    }
}

/// Open a log for reading. The header row is consumed by the reader.
///
/// The reader is flexible about field counts so short rows surface as
/// [`ParseError::MissingFields`] instead of a generic CSV error.
pub fn open_log(path: &Path) -> Result<csv::Reader<File>, ParseError> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))
}

/// Count the data rows (header excluded) of a log.
pub fn count_data_rows(path: &Path) -> Result<u64, ParseError> {
    let mut reader = open_log(path)?;
    let mut rows = 0u64;
    for record in reader.byte_records() {
        record.map_err(|e| csv_error(path, e))?;
        rows += 1;
    }
    Ok(rows)
}

pub(crate) fn csv_error(path: &Path, e: csv::Error) -> ParseError {
    ParseError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
