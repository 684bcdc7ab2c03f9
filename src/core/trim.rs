//! Settling and cool-down margins.
//!
//! Lines are counted physically: the header is line 1 and `total_lines`
//! includes it. With the default margins a line is dropped when it is among
//! the first ten lines or within five of the end, which leaves
//! `data_rows - 15` rows for windowing.

use crate::config::WindowingConfig;

/// Decides which rows of a file reach the window aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimPolicy {
    lead: u64,
    tail: u64,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self { lead: 10, tail: 5 }
    }
}

impl From<&WindowingConfig> for TrimPolicy {
    fn from(config: &WindowingConfig) -> Self {
        Self::new(config.lead_trim, config.tail_trim)
    }
}

impl TrimPolicy {
    pub fn new(lead: u64, tail: u64) -> Self {
        Self { lead, tail }
    }

    /// Whether `line` (1-based, header = 1) of a file with `total_lines`
    /// lines is kept.
    pub fn keeps(&self, line: u64, total_lines: u64) -> bool {
        line > self.lead && line < total_lines.saturating_sub(self.tail)
    }

    /// Number of rows kept from a file with `data_rows` rows after the header.
    pub fn usable_rows(&self, data_rows: u64) -> u64 {
        // kept lines are lead+1 ..= total-tail-1 with total = data_rows + 1
        data_rows.saturating_sub(self.lead + self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_margin_includes_header() {
        let trim = TrimPolicy::default();
        let total = 41;
        for line in 1..=10 {
            assert!(!trim.keeps(line, total), "line {line} should be trimmed");
        }
        assert!(trim.keeps(11, total));
    }

    #[test]
    fn test_tail_margin() {
        let trim = TrimPolicy::default();
        let total = 41;
        assert!(trim.keeps(35, total));
        for line in 36..=41 {
            assert!(!trim.keeps(line, total), "line {line} should be trimmed");
        }
    }

    #[test]
    fn test_usable_rows_matches_keeps() {
        let trim = TrimPolicy::default();
        for data_rows in 0..60u64 {
            let total = data_rows + 1;
            let kept = (2..=total).filter(|&line| trim.keeps(line, total)).count() as u64;
            assert_eq!(kept, trim.usable_rows(data_rows), "data_rows = {data_rows}");
        }
        assert_eq!(trim.usable_rows(25), 10);
        assert_eq!(trim.usable_rows(15), 0);
        assert_eq!(trim.usable_rows(3), 0);
    }

    #[test]
    fn test_custom_margins() {
        let trim = TrimPolicy::new(1, 0);
        // only the header is dropped
        assert!(!trim.keeps(1, 5));
        assert!(trim.keeps(2, 5));
        assert!(trim.keeps(4, 5));
        assert_eq!(trim.usable_rows(4), 3);
    }
}
