//! Construction-time settings for the table engines.

use crate::error::{Result, TableError};
use crate::primes::{PrimeSequence, INITIAL_CAPACITY};
use serde::{Deserialize, Serialize};

/// How open-addressing tables delete. Fixed for the lifetime of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionMode {
    /// Leave a tombstone; it still counts toward the load factor until the
    /// next resize flushes it.
    #[default]
    Soft,
    /// Vacate the slot and rehome whatever the strategy's probe geometry
    /// requires. Never leaves a tombstone.
    Hard,
}

/// Table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Ignored by separate chaining, which always removes eagerly.
    pub deletion: DeletionMode,
    /// Starting capacity. Must be a member of the canonical prime sequence.
    pub initial_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            deletion: DeletionMode::Soft,
            initial_capacity: INITIAL_CAPACITY,
        }
    }
}

impl TableConfig {
    pub fn soft() -> Self {
        Self::default()
    }

    pub fn hard() -> Self {
        Self {
            deletion: DeletionMode::Hard,
            ..Self::default()
        }
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.sequence().map(|_| ())
    }

    /// The capacity sequence positioned at `initial_capacity`.
    pub(crate) fn sequence(&self) -> Result<PrimeSequence> {
        PrimeSequence::starting_at(self.initial_capacity).ok_or_else(|| {
            TableError::config(format!(
                "initial capacity {} is not in the prime capacity sequence",
                self.initial_capacity
            ))
        })
    }
}
