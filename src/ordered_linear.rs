//! Ordered linear probing.
//!
//! Same geometry as [`Linear`](crate::linear::Linear), but every run reachable
//! from a home slot is kept in ascending key order. Insertion performs an
//! insertion-sort step along its probe path: whenever it meets a resident key
//! greater than the one it carries, the two swap and the walk continues with
//! the larger record. Lookups can then stop at the first key that sorts after
//! the target instead of walking to the end of the cluster. Tombstones carry
//! no key and are ignored for ordering.
//!
//! Inserts cost a little more; unsuccessful searches cost less.

use crate::open_addressing::{OpenAddressingTable, ProbeStrategy, Rehome};

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedLinear;

impl ProbeStrategy for OrderedLinear {
    const NAME: &'static str = "ordered-linear";
    const ORDERED: bool = true;
    // Reinsertion goes through the ordered insert, so the rehomed run comes
    // back sorted.
    const REHOME: Rehome = Rehome::FollowingRun;

    #[inline]
    fn probe_index(base: usize, step: usize, capacity: usize) -> usize {
        (base + (step - 1) % capacity) % capacity
    }
}

pub type OrderedLinearProbingTable<S = crate::hash::PolynomialHashBuilder> =
    OpenAddressingTable<OrderedLinear, S>;
