//! Storage vocabulary shared by every engine.

/// A stored key/value pair. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub(crate) fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// One cell of an open-addressing buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    /// Left behind by a soft delete. Walked past by lookups, never written by
    /// inserts, flushed by the next resize.
    Tombstone,
    Occupied(Record),
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(r) => Some(r),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Key of the resident record, if any.
    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.record().map(|r| r.key.as_str())
    }

    /// Replace with `Empty`, returning the resident record if there was one.
    pub(crate) fn vacate(&mut self) -> Option<Record> {
        match std::mem::take(self) {
            Slot::Occupied(r) => Some(r),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

/// A fresh buffer of `capacity` empty slots.
pub(crate) fn empty_buffer(capacity: usize) -> Box<[Slot]> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}
