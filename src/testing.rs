#![cfg(test)]

// Shared helpers for unit and property tests inside the crate.

use core::hash::{BuildHasher, Hasher};

/// Forces every key to home index 0, turning the whole table into one cluster.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConstBuildHasher;
pub(crate) struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}

impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

/// Hashes a key to the number spelled by its leading ASCII digits, so tests
/// can pick home slots directly: `"4a"` homes at `4 % capacity`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DigitPrefixBuildHasher;
#[derive(Default)]
pub(crate) struct DigitPrefixHasher {
    value: u64,
    done: bool,
}

impl BuildHasher for DigitPrefixBuildHasher {
    type Hasher = DigitPrefixHasher;
    fn build_hasher(&self) -> Self::Hasher {
        DigitPrefixHasher::default()
    }
}

impl Hasher for DigitPrefixHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.done || !b.is_ascii_digit() {
                self.done = true;
                return;
            }
            self.value = self.value * 10 + u64::from(b - b'0');
        }
    }
    fn finish(&self) -> u64 {
        self.value
    }
}

pub(crate) fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}
