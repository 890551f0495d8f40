use parsum::partition::{Partition, SplitStrategy, partition, partition_balanced};
use parsum::testing::assert_partitions_cover;
use proptest::prelude::*;
use std::num::NonZeroUsize;

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn partition_end_to_end_example() {
    assert_eq!(
        partition(3, nz(2)),
        vec![Partition::new(0, 1), Partition::new(1, 3)]
    );
}

#[test]
fn partition_remainder_goes_to_last() {
    let parts = partition(10, nz(4));
    assert_eq!(
        parts,
        vec![
            Partition::new(0, 2),
            Partition::new(2, 4),
            Partition::new(4, 6),
            Partition::new(6, 10),
        ]
    );
    assert_eq!(parts.last().unwrap().len(), 4);
}

#[test]
fn partition_single_worker_is_whole_range() {
    assert_eq!(partition(17, nz(1)), vec![Partition::new(0, 17)]);
}

#[test]
fn partition_more_workers_than_records() {
    let parts = partition(3, nz(5));
    assert_eq!(parts.len(), 5);
    assert!(parts[..4].iter().all(Partition::is_empty));
    assert_eq!(parts[4], Partition::new(0, 3));
    assert_partitions_cover(&parts, 3);
}

#[test]
fn partition_empty_dataset() {
    let parts = partition(0, nz(4));
    assert_eq!(parts.len(), 4);
    assert!(parts.iter().all(Partition::is_empty));
    assert_partitions_cover(&parts, 0);
}

#[test]
fn balanced_spreads_remainder_over_first_partitions() {
    let parts = partition_balanced(10, nz(4));
    let lens: Vec<_> = parts.iter().map(Partition::len).collect();
    assert_eq!(lens, vec![3, 3, 2, 2]);
    assert_partitions_cover(&parts, 10);
}

#[test]
fn split_strategy_dispatches() {
    assert_eq!(SplitStrategy::default(), SplitStrategy::RemainderToLast);
    assert_eq!(SplitStrategy::RemainderToLast.split(10, nz(4)), partition(10, nz(4)));
    assert_eq!(SplitStrategy::Balanced.split(10, nz(4)), partition_balanced(10, nz(4)));
}

proptest! {
    #[test]
    fn partitions_cover_range_exactly_once(len in 0usize..5_000, workers in 1usize..300) {
        for strategy in [SplitStrategy::RemainderToLast, SplitStrategy::Balanced] {
            let parts = strategy.split(len, nz(workers));
            prop_assert_eq!(parts.len(), workers);
            assert_partitions_cover(&parts, len);
        }
    }

    #[test]
    fn balanced_lengths_differ_by_at_most_one(len in 0usize..5_000, workers in 1usize..300) {
        let parts = partition_balanced(len, nz(workers));
        let min = parts.iter().map(Partition::len).min().unwrap();
        let max = parts.iter().map(Partition::len).max().unwrap();
        prop_assert!(max - min <= 1);
    }
}
