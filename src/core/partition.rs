//! Deterministic train/validation partitioning.
//!
//! Record `i` goes to validation when `i % 100 <= percent`. The assignment is
//! a pure function of the record's position: no seed, no shuffle. Records that
//! are adjacent in corpus order land in the same bucket, so small files can be
//! routed to one subset wholesale.

use crate::error::RangeError;
use serde::{Deserialize, Serialize};

/// Subset a record is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    Training,
    Validation,
}

/// Convert a validation fraction to a whole percent.
///
/// Rounds half to even, so `0.125` becomes `12`.
///
/// # Errors
///
/// [`RangeError`] when the fraction is not finite or rounds outside `[0, 100]`.
pub fn validation_percent(fraction: f64) -> Result<u32, RangeError> {
    let percent = (fraction * 100.0).round_ties_even();
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(RangeError { fraction, percent });
    }
    Ok(percent as u32)
}

/// Bucket of the record at `index`.
pub fn assign(index: usize, validation_percent: u32) -> Subset {
    if index % 100 <= validation_percent as usize {
        Subset::Validation
    } else {
        Subset::Training
    }
}

/// Index lists for both subsets, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub validation_percent: u32,
    pub training: Vec<usize>,
    pub validation: Vec<usize>,
}

impl Partition {
    /// Partition `len` records.
    pub fn new(len: usize, validation_percent: u32) -> Self {
        let mut training = Vec::new();
        let mut validation = Vec::new();
        for index in 0..len {
            match assign(index, validation_percent) {
                Subset::Training => training.push(index),
                Subset::Validation => validation.push(index),
            }
        }
        Self {
            validation_percent,
            training,
            validation,
        }
    }

    /// Partition `len` records using a validation fraction.
    pub fn from_fraction(len: usize, fraction: f64) -> Result<Self, RangeError> {
        Ok(Self::new(len, validation_percent(fraction)?))
    }

    pub fn subset_of(&self, index: usize) -> Subset {
        assign(index, self.validation_percent)
    }

    pub fn len(&self) -> usize {
        self.training.len() + self.validation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_percent_rounding() {
        assert_eq!(validation_percent(0.2).unwrap(), 20);
        assert_eq!(validation_percent(0.0).unwrap(), 0);
        assert_eq!(validation_percent(1.0).unwrap(), 100);
        assert_eq!(validation_percent(0.125).unwrap(), 12);
        assert_eq!(validation_percent(0.135).unwrap(), 14);
        assert_eq!(validation_percent(1.004).unwrap(), 100);
    }

    #[test]
    fn test_validation_percent_out_of_range() {
        assert!(validation_percent(1.01).is_err());
        assert!(validation_percent(-0.2).is_err());
        assert!(validation_percent(f64::NAN).is_err());
        assert!(validation_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_percent_keeps_bucket_zero() {
        let partition = Partition::new(250, 0);
        assert_eq!(partition.validation, vec![0, 100, 200]);
        assert_eq!(partition.training.len(), 247);
    }

    #[test]
    fn test_full_percent_takes_everything() {
        let partition = Partition::new(250, 100);
        assert_eq!(partition.validation.len(), 250);
        assert!(partition.training.is_empty());
    }

    #[test]
    fn test_twenty_percent_buckets() {
        let partition = Partition::from_fraction(100, 0.2).unwrap();
        // 0..=20 inclusive is 21 records
        assert_eq!(partition.validation, (0..=20).collect::<Vec<_>>());
        assert_eq!(partition.training, (21..100).collect::<Vec<_>>());
        assert_eq!(partition.subset_of(20), Subset::Validation);
        assert_eq!(partition.subset_of(121), Subset::Training);
    }
}
