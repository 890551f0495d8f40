//! # parsum
//!
//! A **parallel partition-reduce engine** over numeric records. A dataset of
//! `(value, group)` records is split into contiguous ranges, each range is
//! scanned by its own worker, and the partial results are folded into one
//! [`Summary`]: total sum, per-group sums, and counts below / at-or-above a
//! fixed threshold of `5.0`. Wall-clock time for the whole run is reported
//! alongside the result.
//!
//! ## Quick Start
//!
//! ```
//! use parsum::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let data = vec![
//!     Record::new(3.0, 1),
//!     Record::new(7.0, 2),
//!     Record::new(4.5, 1),
//! ];
//!
//! let run = Engine::with_workers(2)?.run(&data)?;
//! assert_eq!(run.partitions, vec![Partition::new(0, 1), Partition::new(1, 3)]);
//! assert_eq!(run.summary.sum, 14.5);
//! assert_eq!(run.summary.group_sums[&1], 7.5);
//! assert_eq!(run.summary.below_threshold, 2);
//! assert_eq!(run.summary.at_or_above_threshold, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! - [`partition`] -- splits `[0, len)` into exactly `workers` half-open
//!   ranges; by default the last range absorbs the remainder.
//! - [`worker`] -- scans one range into a partial [`Summary`] with no shared
//!   state.
//! - [`reducer`] -- folds partials; the fold is order-independent.
//! - [`engine`] -- builds a fresh pool per run, runs every worker, waits for
//!   all of them, folds, and times the whole thing.
//!
//! Everything around the engine is thin glue: [`generate`] builds synthetic
//! datasets, [`report`] renders a run to an explicit output sink, and
//! [`sweep`] drives every dataset size against every worker count.
//!
//! ## Guarantees
//!
//! - Partitions cover the dataset exactly once, for any size and worker count.
//! - `below_threshold + at_or_above_threshold` equals the dataset length.
//! - Counts and group keys are identical for every worker count; sums agree up
//!   to floating-point summation order.
//! - [`Engine::run`] returns only after every worker has been folded in. A
//!   panicking worker fails the run instead of yielding a partial total.
//!
//! ## Module Overview
//!
//! - [`record`] - Record and dataset types
//! - [`summary`] - The aggregate shared by partial and final results
//! - [`combiners`] - The `CombineFn` abstraction and the summary combiner
//! - [`error`] - Configuration and engine errors
//! - [`testing`] - Assertions and fixtures for tests

pub mod combiners;
pub mod engine;
pub mod error;
pub mod generate;
pub mod partition;
pub mod record;
pub mod reducer;
pub mod report;
pub mod summary;
pub mod sweep;
pub mod testing;
pub mod worker;

pub use combiners::{CombineFn, SummaryCombiner};
pub use engine::{Delivery, Engine, EngineConfig, Run, run};
pub use error::{ConfigError, EngineError};
pub use generate::Generator;
pub use partition::{Partition, SplitStrategy, partition};
pub use record::{Dataset, GroupKey, Record};
pub use reducer::{SharedSummary, combine};
pub use report::{OutputSink, Report, ReportFormat};
pub use summary::{Summary, THRESHOLD};
pub use sweep::{Sweep, SweepConfig};
pub use worker::run_worker;
