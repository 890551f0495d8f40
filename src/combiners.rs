//! Combiner abstraction used by workers and the reducer.
//!
//! A [`CombineFn`] describes an aggregation in four steps:
//!
//! - `create` -- a fresh, empty accumulator
//! - `add_input` -- fold one input element into an accumulator (worker side)
//! - `merge` -- fold one accumulator into another (reducer side)
//! - `finish` -- turn the final accumulator into the output
//!
//! `merge` must be associative and commutative so that partials can be folded
//! in any order. [`SummaryCombiner`] is the aggregation this crate runs.

use crate::record::Record;
use crate::summary::Summary;

pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}

/// Sum, per-group sums and threshold counts over [`Record`]s.
///
/// - Accumulator: [`Summary`]
/// - Output: [`Summary`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SummaryCombiner;

impl<'a> CombineFn<&'a Record, Summary, Summary> for SummaryCombiner {
    fn create(&self) -> Summary {
        Summary::new()
    }

    fn add_input(&self, acc: &mut Summary, v: &'a Record) {
        acc.add(v);
    }

    fn merge(&self, acc: &mut Summary, other: Summary) {
        acc.merge(other);
    }

    fn finish(&self, acc: Summary) -> Summary {
        acc
    }
}
