//! Pre-built datasets for common testing scenarios.

use crate::generate::Generator;
use crate::record::{Dataset, Record};
use crate::summary::Summary;
use std::collections::BTreeMap;

/// Three records spanning two groups and both sides of the threshold.
///
/// ```
/// use parsum::testing::sample_dataset;
///
/// assert_eq!(sample_dataset().len(), 3);
/// ```
#[must_use]
pub fn sample_dataset() -> Dataset {
    vec![Record::new(3.0, 1), Record::new(7.0, 2), Record::new(4.5, 1)]
}

/// The summary of [`sample_dataset`].
#[must_use]
pub fn sample_summary() -> Summary {
    Summary {
        sum: 14.5,
        group_sums: BTreeMap::from([(1, 7.5), (2, 7.0)]),
        below_threshold: 2,
        at_or_above_threshold: 1,
    }
}

/// A reproducible synthetic dataset of `len` records.
#[must_use]
pub fn seeded_dataset(len: usize, seed: u64) -> Dataset {
    Generator::new(Some(seed)).dataset(len)
}

/// Records sitting exactly on, just below and just above the threshold,
/// including group keys outside the generator's `1..=5`.
#[must_use]
pub fn threshold_edge_dataset() -> Dataset {
    vec![
        Record::new(5.0, 0),
        Record::new(4.999_999, 9),
        Record::new(5.000_001, 9),
        Record::new(0.0, 200),
        Record::new(9.999, 0),
    ]
}

/// Reference summary computed by a single sequential pass.
#[must_use]
pub fn sequential_summary(dataset: &[Record]) -> Summary {
    dataset.iter().collect()
}
