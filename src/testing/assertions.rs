//! Assertion functions for summaries and partition sets.

use crate::partition::Partition;
use crate::summary::Summary;

/// Relative tolerance used when comparing sums produced with different
/// summation orders.
pub const DEFAULT_REL_TOLERANCE: f64 = 1e-9;

/// `true` if `a` and `b` differ by at most `rel_tol` relative to the larger
/// magnitude (absolute near zero).
#[must_use]
pub fn approx_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel_tol * scale
}

/// Assert that two summaries agree: counts and group keys exactly, sums within
/// `rel_tol`.
///
/// # Panics
///
/// Panics with a detailed message on the first mismatch.
///
/// # Example
///
/// ```
/// use parsum::Summary;
/// use parsum::testing::assert_summaries_close;
///
/// let a = Summary::default();
/// assert_summaries_close(&a, &a.clone(), 1e-9);
/// ```
pub fn assert_summaries_close(actual: &Summary, expected: &Summary, rel_tol: f64) {
    assert_eq!(
        actual.below_threshold, expected.below_threshold,
        "below-threshold count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    assert_eq!(
        actual.at_or_above_threshold, expected.at_or_above_threshold,
        "at-or-above-threshold count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    assert!(
        approx_eq(actual.sum, expected.sum, rel_tol),
        "sum mismatch: expected {}, actual {}",
        expected.sum,
        actual.sum
    );

    let actual_keys: Vec<_> = actual.group_sums.keys().collect();
    let expected_keys: Vec<_> = expected.group_sums.keys().collect();
    assert_eq!(
        actual_keys, expected_keys,
        "group key mismatch:\n  Expected: {expected_keys:?}\n  Actual: {actual_keys:?}"
    );
    for (group, e) in &expected.group_sums {
        let a = actual.group_sums[group];
        assert!(
            approx_eq(a, *e, rel_tol),
            "group {group} sum mismatch: expected {e}, actual {a}"
        );
    }
}

/// Assert that `partitions` are contiguous, in order, and cover `[0, len)`
/// exactly once.
///
/// # Panics
///
/// Panics on a gap, an overlap, a reversed range or the wrong end.
pub fn assert_partitions_cover(partitions: &[Partition], len: usize) {
    let mut next = 0;
    for (i, p) in partitions.iter().enumerate() {
        assert!(p.start <= p.end, "partition {i} is reversed: {p:?}");
        assert_eq!(
            p.start, next,
            "partition {i} starts at {} but previous ended at {next}: {partitions:?}",
            p.start
        );
        next = p.end;
    }
    assert_eq!(next, len, "partitions end at {next}, expected {len}: {partitions:?}");
}
