//! Separate chaining: each bucket holds an insertion-ordered chain of records.
//!
//! Unlike the open-addressing tables this one never resizes itself. Callers
//! decide when to [`enlarge`](SeparateChainingTable::enlarge) or
//! [`shrink`](SeparateChainingTable::shrink); both rebuild the bucket array at
//! the neighbouring prime and replay every record.

use crate::config::TableConfig;
use crate::error::Result;
use crate::hash::{home_index, PolynomialHashBuilder};
use crate::primes::PrimeSequence;
use crate::probe::ProbeResult;
use crate::slot::Record;
use crate::table::{check_record, AssociativeTable};
use core::hash::BuildHasher;
use log::{debug, warn};

#[derive(Debug)]
pub struct SeparateChainingTable<S = PolynomialHashBuilder> {
    buckets: Box<[Vec<Record>]>,
    len: usize,
    primes: PrimeSequence,
    hasher: S,
}

fn empty_chains(capacity: usize) -> Box<[Vec<Record>]> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}

impl SeparateChainingTable {
    pub fn new() -> Self {
        Self::with_hasher(PolynomialHashBuilder)
    }

    /// Only `initial_capacity` applies; chains always delete eagerly.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, PolynomialHashBuilder)
    }
}

impl Default for SeparateChainingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher> SeparateChainingTable<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(PrimeSequence::new(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        Ok(Self::from_parts(config.sequence()?, hasher))
    }

    fn from_parts(primes: PrimeSequence, hasher: S) -> Self {
        Self {
            buckets: empty_chains(primes.current()),
            len: 0,
            primes,
            hasher,
        }
    }

    fn home(&self, key: &str) -> usize {
        home_index(&self.hasher, key, self.buckets.len())
    }

    /// The chain stored in bucket `index`, in insertion order.
    pub fn bucket(&self, index: usize) -> &[Record] {
        &self.buckets[index]
    }

    /// Stored records in bucket order, then chain order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.buckets.iter().flatten()
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rebuild at the next capacity in the sequence. Does nothing at the
    /// maximum capacity.
    pub fn enlarge(&mut self) {
        if self.primes.is_at_maximum() {
            warn!(
                "separate-chaining: enlarge requested at maximum capacity {}",
                self.buckets.len()
            );
            return;
        }
        let new_capacity = self.primes.next_prime();
        self.rebuild(new_capacity);
    }

    /// Rebuild at the previous capacity in the sequence. Does nothing at the
    /// minimum capacity.
    pub fn shrink(&mut self) {
        if self.primes.is_at_minimum() {
            warn!(
                "separate-chaining: shrink requested at minimum capacity {}",
                self.buckets.len()
            );
            return;
        }
        let new_capacity = self.primes.previous_prime();
        self.rebuild(new_capacity);
    }

    fn rebuild(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        let old = core::mem::replace(&mut self.buckets, empty_chains(new_capacity));
        self.len = 0;
        for record in old.into_vec().into_iter().flatten() {
            self.append(record);
        }
        debug!(
            "separate-chaining: rebuilt {} -> {} ({} records replayed)",
            old_capacity, new_capacity, self.len
        );
    }

    fn append(&mut self, record: Record) {
        let index = self.home(&record.key);
        self.buckets[index].push(record);
        self.len += 1;
    }
}

impl<S: BuildHasher> AssociativeTable for SeparateChainingTable<S> {
    /// Appends to the home chain; always costs one probe.
    fn put<'v>(&mut self, key: &str, value: &'v str) -> Result<ProbeResult<&'v str>> {
        check_record(key, value)?;
        self.append(Record::new(key, value));
        Ok(ProbeResult::found(value, 1))
    }

    /// A hit at chain position `i` costs `i + 1`; a miss costs the chain
    /// length, and at least 1 for the hash itself.
    fn get(&self, key: &str) -> ProbeResult<&str> {
        if key.is_empty() {
            return ProbeResult::absent_key();
        }
        let chain = &self.buckets[self.home(key)];
        match chain.iter().position(|r| r.key == key) {
            Some(i) => ProbeResult::found(chain[i].value.as_str(), i + 1),
            None => ProbeResult::missing(chain.len().max(1)),
        }
    }

    fn remove(&mut self, key: &str) -> ProbeResult<String> {
        if key.is_empty() {
            return ProbeResult::absent_key();
        }
        let index = self.home(key);
        let chain = &mut self.buckets[index];
        match chain.iter().position(|r| r.key == key) {
            Some(i) => {
                let record = chain.remove(i);
                self.len -= 1;
                ProbeResult::found(record.value, i + 1)
            }
            None => ProbeResult::missing(chain.len().max(1)),
        }
    }

    fn contains_value(&self, value: &str) -> bool {
        self.records().any(|r| r.value == value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }
}
