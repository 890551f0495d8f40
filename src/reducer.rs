//! Folding partial summaries into the final one.
//!
//! Two shapes are provided:
//!
//! - [`combine`] -- a single consumer folds an already-joined set of partials.
//! - [`SharedSummary`] -- a mutex-guarded accumulator for partials delivered
//!   concurrently; each merge happens under the lock.

use crate::combiners::{CombineFn, SummaryCombiner};
use crate::record::Record;
use crate::summary::Summary;
use std::sync::{Mutex, PoisonError};

/// Fold every partial into one summary. The result does not depend on the
/// order of `partials` beyond floating-point summation order.
pub fn combine<I>(partials: I) -> Summary
where
    I: IntoIterator<Item = Summary>,
{
    combine_with::<&Record, _, _, _>(&SummaryCombiner, partials)
}

/// Fold accumulators through any [`CombineFn`] and finish the result.
pub fn combine_with<V, A, O, C>(comb: &C, partials: impl IntoIterator<Item = A>) -> O
where
    C: CombineFn<V, A, O>,
{
    let mut acc = comb.create();
    for p in partials {
        comb.merge(&mut acc, p);
    }
    comb.finish(acc)
}

/// Accumulator that may receive partials from several threads at once.
///
/// The final value is only reachable through [`SharedSummary::into_inner`],
/// which consumes the accumulator, so it cannot be read while deliveries are
/// still possible through a borrowed handle.
#[derive(Debug, Default)]
pub struct SharedSummary {
    inner: Mutex<Summary>,
}

impl SharedSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one partial under the lock.
    pub fn merge(&self, partial: Summary) {
        // Poisoning means a merge panicked; the engine fails that run.
        let mut acc = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        acc.merge(partial);
    }

    #[must_use]
    pub fn into_inner(self) -> Summary {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
