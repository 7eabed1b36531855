//! Deterministic string hashing and slot addressing.

use core::hash::{BuildHasher, Hasher};

/// Builds [`PolynomialHasher`]s. The default hasher of every table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolynomialHashBuilder;

impl BuildHasher for PolynomialHashBuilder {
    type Hasher = PolynomialHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PolynomialHasher::default()
    }
}

/// The classic `h = 31 * h + byte` string hash in wrapping 32-bit signed
/// arithmetic. For ASCII keys this matches `java.lang.String::hashCode`, which
/// keeps probe counts reproducible across runs and platforms.
///
/// `finish` masks the sign bit, so the result is always non-negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialHasher {
    state: i32,
}

impl Hasher for PolynomialHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_mul(31).wrapping_add(i32::from(b));
        }
    }

    fn finish(&self) -> u64 {
        u64::from((self.state & 0x7fff_ffff) as u32)
    }
}

/// Home index of `key` in a buffer of `capacity` slots.
///
/// The key's bytes go through a single `write` call rather than `Hash for str`,
/// so no length prefix or terminator is mixed in.
pub(crate) fn home_index<S: BuildHasher>(hasher: &S, key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    let mut h = hasher.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % capacity as u64) as usize
}
