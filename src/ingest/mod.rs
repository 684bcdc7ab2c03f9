//! Log discovery and row parsing.
//!
//! This module finds sensor logs on disk and turns their rows into typed
//! samples. It knows nothing about windows or labels.

pub mod parser;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use parser::{count_data_rows, open_log, parse_record, parse_row, FIELD_COUNT};
pub use scanner::scan;
pub use types::{Axis3, RawSample};
