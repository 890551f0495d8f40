use parsum::testing::*;
use parsum::worker::fold_partition;
use parsum::*;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

fn partials(data: &[Record], workers: usize) -> Vec<Summary> {
    partition(data.len(), NonZeroUsize::new(workers).unwrap())
        .into_iter()
        .map(|p| run_worker(data, p))
        .collect()
}

#[test]
fn worker_scans_only_its_range() {
    let data = sample_dataset();
    let s = run_worker(&data, Partition::new(1, 3));
    assert_eq!(s.sum, 11.5);
    assert_eq!(s.group_sums, BTreeMap::from([(1, 4.5), (2, 7.0)]));
    assert_eq!(s.below_threshold, 1);
    assert_eq!(s.at_or_above_threshold, 1);
}

#[test]
fn worker_on_empty_range_is_zero() {
    let data = sample_dataset();
    assert_eq!(run_worker(&data, Partition::new(2, 2)), Summary::default());
    assert_eq!(run_worker(&[], Partition::new(0, 0)), Summary::default());
}

#[test]
#[should_panic]
fn worker_out_of_range_panics() {
    let data = sample_dataset();
    let _ = run_worker(&data, Partition::new(2, 4));
}

#[test]
fn fold_partition_with_summary_combiner_matches_worker() {
    let data = seeded_dataset(500, 1);
    let p = Partition::new(100, 400);
    assert_eq!(fold_partition(&SummaryCombiner, &data, p), run_worker(&data, p));
}

#[test]
fn threshold_is_inclusive_at_five() {
    let s = run_worker(&[Record::new(THRESHOLD, 1)], Partition::new(0, 1));
    assert_eq!(s.below_threshold, 0);
    assert_eq!(s.at_or_above_threshold, 1);
}

#[test]
fn combine_sums_partials() {
    let data = sample_dataset();
    let combined = combine(partials(&data, 2));
    assert_eq!(combined, sample_summary());
}

#[test]
fn combine_is_order_independent() {
    let data = seeded_dataset(20_000, 9);
    let mut parts = partials(&data, 16);
    let forward = combine(parts.clone());
    parts.reverse();
    let backward = combine(parts.clone());
    parts.rotate_left(5);
    let rotated = combine(parts);

    assert_summaries_close(&backward, &forward, DEFAULT_REL_TOLERANCE);
    assert_summaries_close(&rotated, &forward, DEFAULT_REL_TOLERANCE);
}

#[test]
fn combine_of_nothing_is_zero() {
    assert_eq!(combine(Vec::new()), Summary::default());
}

#[test]
fn merge_fills_groups_missing_from_one_side() {
    let mut a = Summary {
        sum: 1.0,
        group_sums: BTreeMap::from([(1, 1.0)]),
        below_threshold: 1,
        at_or_above_threshold: 0,
    };
    let b = Summary {
        sum: 6.0,
        group_sums: BTreeMap::from([(3, 6.0)]),
        below_threshold: 0,
        at_or_above_threshold: 1,
    };
    a.merge(b);
    assert_eq!(a.sum, 7.0);
    assert_eq!(a.group_sums, BTreeMap::from([(1, 1.0), (3, 6.0)]));
    assert_eq!(a.count(), 2);
}

#[test]
fn shared_summary_serializes_concurrent_merges() {
    let data = seeded_dataset(50_000, 5);
    let parts = partials(&data, 64);
    let expected = combine(parts.clone());

    let shared = SharedSummary::new();
    std::thread::scope(|s| {
        for p in parts {
            let shared = &shared;
            s.spawn(move || shared.merge(p));
        }
    });

    assert_summaries_close(&shared.into_inner(), &expected, DEFAULT_REL_TOLERANCE);
}

#[test]
fn combine_with_custom_combiner() {
    struct CountOnly;
    impl CombineFn<u64, u64, u64> for CountOnly {
        fn create(&self) -> u64 {
            0
        }
        fn add_input(&self, acc: &mut u64, v: u64) {
            *acc += v;
        }
        fn merge(&self, acc: &mut u64, other: u64) {
            *acc += other;
        }
        fn finish(&self, acc: u64) -> u64 {
            acc
        }
    }

    let total: u64 = parsum::reducer::combine_with::<u64, _, _, _>(&CountOnly, vec![1u64, 2, 3]);
    assert_eq!(total, 6);
}
