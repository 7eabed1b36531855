//! Probe-count instrumentation.

use serde::Serialize;

/// The outcome of a lookup or mutation: the value involved, if any, plus the
/// number of slot or chain-node examinations it took.
///
/// `probes == 0` means the operation was handed an absent key and did not
/// touch the table at all. A present key that is simply not stored reports
/// `value: None` with `probes > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProbeResult<T> {
    pub value: Option<T>,
    pub probes: usize,
}

impl<T> ProbeResult<T> {
    #[inline]
    pub fn new(value: Option<T>, probes: usize) -> Self {
        Self { value, probes }
    }

    #[inline]
    pub fn found(value: T, probes: usize) -> Self {
        Self::new(Some(value), probes)
    }

    #[inline]
    pub fn missing(probes: usize) -> Self {
        Self::new(None, probes)
    }

    /// Result for an absent key: no value, no probes.
    #[inline]
    pub fn absent_key() -> Self {
        Self::missing(0)
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ProbeResult<U> {
        ProbeResult {
            value: self.value.map(f),
            probes: self.probes,
        }
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T: AsRef<str>> ProbeResult<T> {
    pub fn as_deref(&self) -> ProbeResult<&str> {
        ProbeResult {
            value: self.value.as_ref().map(AsRef::as_ref),
            probes: self.probes,
        }
    }
}
