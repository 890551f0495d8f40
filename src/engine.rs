//! Aggregation engine: partition, run workers in parallel, fold, time.
//!
//! Each run builds a fresh rayon pool with exactly `workers` threads and drops
//! it when the run returns. Nothing is shared between runs.
//!
//! Two delivery modes are supported and always produce the same result:
//!
//! - [`Delivery::JoinThenFold`] -- workers run as a parallel task group, every
//!   partial is collected (join-all), then a single consumer folds them.
//! - [`Delivery::Streaming`] -- each worker sends its partial on a bounded
//!   channel as soon as it finishes; the calling thread drains the channel and
//!   merges into a [`SharedSummary`] under its lock.
//!
//! In both modes `run` blocks until every worker has finished and been folded.

use crate::error::{ConfigError, EngineError};
use crate::partition::{Partition, SplitStrategy};
use crate::record::Record;
use crate::reducer::{SharedSummary, combine};
use crate::summary::Summary;
use crate::worker::run_worker;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// How partials travel from workers to the reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    #[default]
    JoinThenFold,
    Streaming,
}

/// Validated engine settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub workers: NonZeroUsize,
    #[serde(default)]
    pub split: SplitStrategy,
    #[serde(default)]
    pub delivery: Delivery,
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWorkers`] if `workers == 0`.
    pub fn new(workers: usize) -> Result<Self, ConfigError> {
        let workers = NonZeroUsize::new(workers).ok_or(ConfigError::ZeroWorkers)?;
        Ok(Self {
            workers,
            split: SplitStrategy::default(),
            delivery: Delivery::default(),
        })
    }

    #[must_use]
    pub const fn with_split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub const fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
            split: SplitStrategy::default(),
            delivery: Delivery::default(),
        }
    }
}

/// Outcome of one aggregation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub summary: Summary,
    pub elapsed: Duration,
    pub partitions: Vec<Partition>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    pub config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Shorthand for an engine with `workers` workers and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWorkers`] if `workers == 0`.
    pub fn with_workers(workers: usize) -> Result<Self, ConfigError> {
        EngineConfig::new(workers).map(Self::new)
    }

    /// Aggregate `dataset` across the configured number of workers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ThreadPool`] if the worker pool cannot be built
    /// and [`EngineError::WorkerPanicked`] if any worker panics. No partial
    /// result is returned in either case.
    pub fn run(&self, dataset: &[Record]) -> Result<Run, EngineError> {
        let start = Instant::now();
        let workers = self.config.workers;
        let partitions = self.config.split.split(dataset.len(), workers);
        debug!(
            records = dataset.len(),
            workers = workers.get(),
            split = ?self.config.split,
            delivery = ?self.config.delivery,
            "starting aggregation run"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .thread_name(|i| format!("parsum-worker-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        let summary = aggregate(&pool, dataset, &partitions, self.config.delivery)?;
        drop(pool);

        let elapsed = start.elapsed();
        debug!(elapsed_ns = elapsed.as_nanos(), "aggregation run finished");
        Ok(Run { summary, elapsed, partitions })
    }
}

/// Aggregate `dataset` with `workers` workers and default settings, returning
/// the final summary and the elapsed wall-clock time.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if `workers == 0`, otherwise see
/// [`Engine::run`].
pub fn run(dataset: &[Record], workers: usize) -> Result<(Summary, Duration), EngineError> {
    let run = Engine::with_workers(workers)?.run(dataset)?;
    Ok((run.summary, run.elapsed))
}

/// Run every partition on `pool` and fold the partials. A panicking worker
/// turns into [`EngineError::WorkerPanicked`] once all workers have stopped.
pub(crate) fn aggregate(
    pool: &rayon::ThreadPool,
    dataset: &[Record],
    partitions: &[Partition],
    delivery: Delivery,
) -> Result<Summary, EngineError> {
    catch_unwind(AssertUnwindSafe(|| match delivery {
        Delivery::JoinThenFold => join_then_fold(pool, dataset, partitions),
        Delivery::Streaming => streaming(pool, dataset, partitions),
    }))
    .map_err(|payload| EngineError::from_panic(payload.as_ref()))
}

fn join_then_fold(pool: &rayon::ThreadPool, dataset: &[Record], partitions: &[Partition]) -> Summary {
    let partials: Vec<Summary> = pool.install(|| {
        partitions
            .par_iter()
            .map(|&p| {
                trace!(start = p.start, end = p.end, "worker scanning partition");
                run_worker(dataset, p)
            })
            .collect()
    });
    combine(partials)
}

fn streaming(pool: &rayon::ThreadPool, dataset: &[Record], partitions: &[Partition]) -> Summary {
    let (tx, rx) = crossbeam_channel::bounded::<Summary>(partitions.len());
    let acc = SharedSummary::new();

    // The caller drains on its own thread; the pool threads only run workers.
    pool.in_place_scope(|s| {
        for &p in partitions {
            let tx = tx.clone();
            s.spawn(move |_| {
                trace!(start = p.start, end = p.end, "worker scanning partition");
                // Only fails once rx is dropped, and rx outlives the scope.
                let _ = tx.send(run_worker(dataset, p));
            });
        }
        drop(tx);
        for partial in &rx {
            acc.merge(partial);
        }
    });
    acc.into_inner()
}
