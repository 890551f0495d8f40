//! Rendering run results into an explicit output sink.
//!
//! Reports are written to any [`Write`]; nothing here touches process-wide
//! stdout. [`OutputSink`] is the per-run file destination used by the sweep
//! driver: it is created for one `(N, T)` combination, written once and closed
//! when finished or dropped.

use crate::engine::Run;
use crate::summary::{Summary, THRESHOLD};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    /// Write `report` in this format.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn write<W: Write>(self, out: &mut W, report: &Report) -> Result<()> {
        match self {
            Self::Text => write_text(out, report),
            Self::Json => write_json(out, report),
        }
    }
}

/// One reported `(N, T)` combination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub exponent: u32,
    pub workers: usize,
    pub records: usize,
    pub summary: Summary,
    pub elapsed_ns: u64,
}

impl Report {
    #[must_use]
    pub fn new(exponent: u32, workers: usize, records: usize, run: Run) -> Self {
        Self {
            exponent,
            workers,
            records,
            summary: run.summary,
            elapsed_ns: u64::try_from(run.elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }
}

/// Human-readable layout: header, total, one line per group (ascending),
/// the two threshold counts, elapsed nanoseconds and a separator.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_text<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    let s = &report.summary;
    writeln!(out, "Test with N={}, T={}:", report.exponent, report.workers)?;
    writeln!(out, "Total Sum: {:.2}", s.sum)?;
    writeln!(out, "Group Sums:")?;
    for (group, sum) in &s.group_sums {
        writeln!(out, "Group {group}: {sum:.2}")?;
    }
    writeln!(out, "Values < {THRESHOLD}: {}", s.below_threshold)?;
    writeln!(out, "Values >= {THRESHOLD}: {}", s.at_or_above_threshold)?;
    writeln!(out, "Processing time: {} nanoseconds", report.elapsed_ns)?;
    writeln!(out, "------")?;
    Ok(())
}

/// Pretty-printed JSON of the whole [`Report`].
///
/// # Errors
///
/// Propagates serialization and I/O errors.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// `n{N}_t{T}.{ext}`
#[must_use]
pub fn file_name(exponent: u32, workers: usize, format: ReportFormat) -> String {
    format!("n{exponent}_t{workers}.{}", format.extension())
}

/// A buffered per-run output file.
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputSink {
    /// Create (or truncate) the output file for one combination in `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created.
    pub fn create(dir: &Path, exponent: u32, workers: usize, format: ReportFormat) -> Result<Self> {
        let path = dir.join(file_name(exponent, workers, format));
        let file = File::create(&path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        Ok(Self { path, writer: BufWriter::new(file) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the file, returning its path.
    ///
    /// # Errors
    ///
    /// Fails if buffered data cannot be written out.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("flushing {}", self.path.display()))?;
        Ok(self.path)
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
