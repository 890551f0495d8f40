//! Synthetic dataset generation.
//!
//! Values are uniform in `[0, 10)` and groups uniform in `1..=5`. A fixed seed
//! makes the dataset reproducible, so the same data can be fed to every worker
//! count in a sweep.

use crate::error::ConfigError;
use crate::record::{Dataset, GroupKey, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const VALUE_MAX: f64 = 10.0;
pub const GROUP_MIN: GroupKey = 1;
pub const GROUP_MAX: GroupKey = 5;

/// `10^exponent` as a dataset length.
///
/// # Errors
///
/// Returns [`ConfigError::ExponentTooLarge`] if the length overflows `usize`
/// or a `Vec<Record>` of that length could not be allocated (more than
/// `isize::MAX` bytes).
pub fn size_for_exponent(exponent: u32) -> Result<usize, ConfigError> {
    10usize
        .checked_pow(exponent)
        .filter(|&len| {
            len.checked_mul(size_of::<Record>())
                .is_some_and(|bytes| isize::try_from(bytes).is_ok())
        })
        .ok_or(ConfigError::ExponentTooLarge { exponent })
}

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    #[must_use]
    pub fn record(&mut self) -> Record {
        Record {
            value: self.rng.gen_range(0.0..VALUE_MAX),
            group: self.rng.gen_range(GROUP_MIN..=GROUP_MAX),
        }
    }

    #[must_use]
    pub fn dataset(&mut self, len: usize) -> Dataset {
        debug!(len, "generating dataset");
        (0..len).map(|_| self.record()).collect()
    }

    /// Generate `10^exponent` records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ExponentTooLarge`] if the length overflows `usize`.
    pub fn dataset_pow10(&mut self, exponent: u32) -> Result<Dataset, ConfigError> {
        Ok(self.dataset(size_for_exponent(exponent)?))
    }
}
