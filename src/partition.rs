//! Splitting a dataset into contiguous, per-worker index ranges.
//!
//! Every split returns exactly `workers` partitions whose union is `[0, len)`
//! with no gaps or overlaps. Partitions may be empty when there are more
//! workers than records.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;

/// A half-open index range `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// How the remainder of `len / workers` is assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Equal chunks of `len / workers`; the last partition absorbs the
    /// remainder (up to `workers - 1` extra records).
    #[default]
    RemainderToLast,
    /// One extra record for each of the first `len % workers` partitions.
    Balanced,
}

impl SplitStrategy {
    #[must_use]
    pub fn split(self, len: usize, workers: NonZeroUsize) -> Vec<Partition> {
        match self {
            Self::RemainderToLast => partition(len, workers),
            Self::Balanced => partition_balanced(len, workers),
        }
    }
}

/// Split `[0, len)` into `workers` ranges, giving the remainder to the last one.
///
/// ```
/// use parsum::partition::{partition, Partition};
/// use std::num::NonZeroUsize;
///
/// let parts = partition(3, NonZeroUsize::new(2).unwrap());
/// assert_eq!(parts, vec![Partition::new(0, 1), Partition::new(1, 3)]);
/// ```
#[must_use]
pub fn partition(len: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let n = workers.get();
    let chunk = len / n;
    (0..n)
        .map(|i| {
            let start = i * chunk;
            let end = if i == n - 1 { len } else { start + chunk };
            Partition::new(start, end)
        })
        .collect()
}

/// Split `[0, len)` into `workers` ranges whose lengths differ by at most one.
#[must_use]
pub fn partition_balanced(len: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let n = workers.get();
    let chunk = len / n;
    let extra = len % n;
    let mut out = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let end = start + chunk + usize::from(i < extra);
        out.push(Partition::new(start, end));
        start = end;
    }
    out
}
