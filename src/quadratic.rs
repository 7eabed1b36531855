//! Quadratic probing.
//!
//! From home index `b` the i-th probe lands on `b + (i-1) + (i-1)^2`, i.e.
//! `b, b+2, b+6, b+12, ...` modulo capacity. Spreading probes out avoids the
//! primary clustering of linear probing at the price of cache locality.
//!
//! Over a prime capacity `p` the offsets `k(k+1) mod p` take exactly
//! `(p+1)/2` distinct values. Inserts run with `occupied <= p/2`, so an empty
//! slot is always reachable; lookups give up after `p` steps because the
//! sequence may cycle through a fully occupied half without meeting one.
//!
//! Offsets are not contiguous, so a hard delete cannot know which records
//! stepped over the freed slot. It rehashes the whole table instead: O(n)
//! per hard delete, inherent to this strategy.

use crate::open_addressing::{OpenAddressingTable, ProbeStrategy, Rehome};

#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

impl ProbeStrategy for Quadratic {
    const NAME: &'static str = "quadratic";
    const REHOME: Rehome = Rehome::WholeTable;

    #[inline]
    fn probe_index(base: usize, step: usize, capacity: usize) -> usize {
        let k = (step - 1) as u128;
        ((base as u128 + k + k * k) % capacity as u128) as usize
    }
}

pub type QuadraticProbingTable<S = crate::hash::PolynomialHashBuilder> =
    OpenAddressingTable<Quadratic, S>;
