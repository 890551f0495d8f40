//! Record shape consumed by the engine.

use serde::{Deserialize, Serialize};

/// Group tag carried by every record.
///
/// The generator draws tags from `1..=5`, but nothing in the engine depends on
/// that universe: any `u8` is accumulated under its own key.
pub type GroupKey = u8;

/// A single immutable input row: a numeric value and its group tag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub value: f64,
    pub group: GroupKey,
}

impl Record {
    #[must_use]
    pub const fn new(value: f64, group: GroupKey) -> Self {
        Self { value, group }
    }
}

impl From<(f64, GroupKey)> for Record {
    fn from((value, group): (f64, GroupKey)) -> Self {
        Self { value, group }
    }
}

/// An ordered, read-only collection of records. Workers only ever see it as
/// `&[Record]`.
pub type Dataset = Vec<Record>;
