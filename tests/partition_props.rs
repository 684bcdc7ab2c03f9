//! Property tests for the index-based train/validation split.

use activity_dataset::core::{assign, validation_percent, Partition, Subset};
use proptest::prelude::*;

proptest! {
    #[test]
    fn every_index_lands_in_exactly_one_subset(len in 0usize..1000, fraction in 0.0f64..=1.0) {
        let partition = Partition::from_fraction(len, fraction).unwrap();

        prop_assert_eq!(partition.len(), len);
        let mut all: Vec<usize> = partition
            .training
            .iter()
            .chain(&partition.validation)
            .copied()
            .collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn assignment_depends_only_on_bucket(index in 0usize..100_000, percent in 0u32..=100) {
        let expected = if (index % 100) as u32 <= percent {
            Subset::Validation
        } else {
            Subset::Training
        };
        prop_assert_eq!(assign(index, percent), expected);
        prop_assert_eq!(assign(index + 100, percent), expected);
    }

    #[test]
    fn zero_percent_validates_only_bucket_zero(len in 0usize..1000) {
        let partition = Partition::new(len, 0);
        prop_assert!(partition.validation.iter().all(|i| i % 100 == 0));
        prop_assert_eq!(partition.validation.len(), len.div_ceil(100));
    }

    #[test]
    fn full_percent_validates_everything(len in 0usize..1000) {
        let partition = Partition::new(len, 100);
        prop_assert!(partition.training.is_empty());
        prop_assert_eq!(partition.validation.len(), len);
    }

    #[test]
    fn fractions_in_unit_interval_are_accepted(fraction in 0.0f64..=1.0) {
        let percent = validation_percent(fraction).unwrap();
        prop_assert!(percent <= 100);
    }

    #[test]
    fn fractions_well_outside_are_rejected(fraction in 1.01f64..1e6) {
        prop_assert!(validation_percent(fraction).is_err());
        prop_assert!(validation_percent(-fraction).is_err());
    }
}
