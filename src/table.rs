//! The capability contract every engine implements.

use crate::error::Result;
use crate::probe::ProbeResult;

/// A string-to-string associative table that reports the probe cost of each
/// operation.
///
/// An *absent* key or value is the empty string. `put` rejects absent fields;
/// every other operation treats an absent key as a no-op costing zero probes.
///
/// `put` never looks for an existing occurrence of the key: putting the same
/// key twice stores two live records. Remove first for replace semantics.
pub trait AssociativeTable {
    /// Insert `key -> value`, echoing `value` back with the probe cost.
    fn put<'v>(&mut self, key: &str, value: &'v str) -> Result<ProbeResult<&'v str>>;

    fn get(&self, key: &str) -> ProbeResult<&str>;

    /// Remove one record stored under `key` and return its value.
    fn remove(&mut self, key: &str) -> ProbeResult<String>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_found()
    }

    /// Linear scan over stored records only.
    fn contains_value(&self, value: &str) -> bool;

    /// Number of records retrievable by `get`.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the backing buffer.
    fn capacity(&self) -> usize;
}

/// Rejects absent fields before any mutation happens.
pub(crate) fn check_record(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(crate::error::TableError::absent("key"));
    }
    if value.is_empty() {
        return Err(crate::error::TableError::absent("value"));
    }
    Ok(())
}
