//! Per-partition scan.

use crate::combiners::{CombineFn, SummaryCombiner};
use crate::partition::Partition;
use crate::record::Record;
use crate::summary::Summary;

/// Scan `dataset[partition]` in index order and return its partial summary.
///
/// Touches no shared state. An empty partition yields the zero summary.
///
/// # Panics
///
/// Panics if `partition` does not lie within `dataset`; partitions come from
/// the partitioner, so this is a programming error rather than a runtime one.
#[must_use]
pub fn run_worker(dataset: &[Record], partition: Partition) -> Summary {
    fold_partition(&SummaryCombiner, dataset, partition)
}

/// Fold one partition through any [`CombineFn`] over borrowed records.
pub fn fold_partition<'a, C, A>(comb: &C, dataset: &'a [Record], partition: Partition) -> A
where
    C: CombineFn<&'a Record, A, A>,
{
    let mut acc = comb.create();
    for record in &dataset[partition.range()] {
        comb.add_input(&mut acc, record);
    }
    acc
}
