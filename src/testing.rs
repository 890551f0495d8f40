//! Testing utilities for engine runs.
//!
//! - **Assertions**: compare summaries with a floating-point tolerance and
//!   check that a set of partitions covers a range exactly once
//! - **Fixtures**: small hand-written datasets and seeded synthetic ones
//!
//! # Quick Start
//!
//! ```
//! use parsum::engine::Engine;
//! use parsum::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = sample_dataset();
//! let one = Engine::with_workers(1)?.run(&data)?;
//! let many = Engine::with_workers(8)?.run(&data)?;
//! assert_summaries_close(&one.summary, &many.summary, DEFAULT_REL_TOLERANCE);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
