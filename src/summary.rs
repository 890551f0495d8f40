//! The aggregate produced by a worker and by the final reduction.
//!
//! A [`Summary`] is both the per-partition partial result and the combined
//! final result: the reduction is a sum of sums, so both share one shape.

use crate::record::{GroupKey, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values strictly below this are counted in `below_threshold`; all others in
/// `at_or_above_threshold`.
pub const THRESHOLD: f64 = 5.0;

/// Sum, per-group sums and threshold counts over some set of records.
///
/// Groups that never appeared are absent from `group_sums`; a group that did
/// appear is always present, even if its values summed to zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub sum: f64,
    pub group_sums: BTreeMap<GroupKey, f64>,
    pub below_threshold: u64,
    pub at_or_above_threshold: u64,
}

impl Summary {
    /// The zero summary (no records seen).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single record into this summary.
    #[inline]
    pub fn add(&mut self, record: &Record) {
        self.sum += record.value;
        *self.group_sums.entry(record.group).or_insert(0.0) += record.value;
        if record.value < THRESHOLD {
            self.below_threshold += 1;
        } else {
            self.at_or_above_threshold += 1;
        }
    }

    /// Fold another summary into this one. Commutative and associative up to
    /// floating-point summation order.
    pub fn merge(&mut self, other: Self) {
        self.sum += other.sum;
        for (group, sum) in other.group_sums {
            *self.group_sums.entry(group).or_insert(0.0) += sum;
        }
        self.below_threshold += other.below_threshold;
        self.at_or_above_threshold += other.at_or_above_threshold;
    }

    /// Total number of records folded in.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.below_threshold + self.at_or_above_threshold
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<'a> FromIterator<&'a Record> for Summary {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        let mut out = Self::new();
        for r in iter {
            out.add(r);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_buckets_by_threshold() {
        let mut s = Summary::new();
        s.add(&Record::new(4.0, 1));
        s.add(&Record::new(5.0, 1));
        s.add(&Record::new(9.5, 3));
        assert_eq!(s.sum, 18.5);
        assert_eq!(s.group_sums, BTreeMap::from([(1, 9.0), (3, 9.5)]));
        assert_eq!((s.below_threshold, s.at_or_above_threshold), (1, 2));
        assert_eq!(s.count(), 3);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let s: Summary = [Record::new(1.0, 2), Record::new(6.0, 4)].iter().collect();
        let mut merged = s.clone();
        merged.merge(Summary::new());
        assert_eq!(merged, s);
        assert!(Summary::new().is_empty());
    }
}
