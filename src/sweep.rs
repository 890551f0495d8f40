//! The outer sweep: every dataset exponent against every worker count.
//!
//! For each `(N, T)` the driver generates `10^N` records, runs the engine with
//! `T` workers and writes the report to its own [`OutputSink`]. With a seed,
//! every worker count for the same `N` sees the same data.

use crate::engine::{Delivery, Engine, EngineConfig};
use crate::error::ConfigError;
use crate::generate::{Generator, size_for_exponent};
use crate::partition::SplitStrategy;
use crate::report::{OutputSink, Report, ReportFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn default_exponents() -> Vec<u32> {
    vec![5, 7, 9]
}

fn default_workers() -> Vec<usize> {
    vec![1, 4, 16, 64, 256]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub exponents: Vec<u32>,
    pub workers: Vec<usize>,
    pub output_dir: PathBuf,
    pub format: ReportFormat,
    pub seed: Option<u64>,
    pub split: SplitStrategy,
    pub delivery: Delivery,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            exponents: default_exponents(),
            workers: default_workers(),
            output_dir: default_output_dir(),
            format: ReportFormat::default(),
            seed: None,
            split: SplitStrategy::default(),
            delivery: Delivery::default(),
        }
    }
}

impl SweepConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid JSON for this shape.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading sweep config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing sweep config {}", path.display()))
    }

    /// Reject anything that would fail mid-sweep.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exponents.is_empty() {
            return Err(ConfigError::EmptySweep("dataset sizes"));
        }
        if self.workers.is_empty() {
            return Err(ConfigError::EmptySweep("worker counts"));
        }
        if self.workers.contains(&0) {
            return Err(ConfigError::ZeroWorkers);
        }
        for &exponent in &self.exponents {
            size_for_exponent(exponent)?;
        }
        Ok(())
    }
}

pub struct Sweep {
    config: SweepConfig,
}

impl Sweep {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run every combination, writing one file each. Stops at the first error.
    ///
    /// # Errors
    ///
    /// Fails on output-file errors or a failed engine run.
    pub fn run(&self) -> Result<Vec<Report>> {
        let cfg = &self.config;
        fs::create_dir_all(&cfg.output_dir)
            .with_context(|| format!("creating output dir {}", cfg.output_dir.display()))?;

        let mut reports = Vec::with_capacity(cfg.exponents.len() * cfg.workers.len());
        for &exponent in &cfg.exponents {
            for &workers in &cfg.workers {
                // Same seed per exponent -> same data for every worker count.
                let mut generator = Generator::new(cfg.seed.map(|s| s ^ u64::from(exponent)));
                let dataset = generator.dataset_pow10(exponent)?;

                let engine = Engine::new(
                    EngineConfig::new(workers)?
                        .with_split(cfg.split)
                        .with_delivery(cfg.delivery),
                );
                let run = engine
                    .run(&dataset)
                    .with_context(|| format!("aggregation run N={exponent} T={workers}"))?;
                let report = Report::new(exponent, workers, dataset.len(), run);
                drop(dataset);

                let mut sink = OutputSink::create(&cfg.output_dir, exponent, workers, cfg.format)?;
                cfg.format.write(&mut sink, &report)?;
                let path = sink.finish()?;
                info!(
                    exponent,
                    workers,
                    elapsed_ns = report.elapsed_ns,
                    path = %path.display(),
                    "combination reported"
                );
                reports.push(report);
            }
        }
        Ok(reports)
    }
}
