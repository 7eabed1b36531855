//! OpenAddressingTable: one engine for every open-addressing strategy.
//!
//! The engine owns the slot buffer, the live/occupied counters, the deletion
//! mode and the hasher. A [`ProbeStrategy`] type parameter supplies the probe
//! geometry, whether runs are kept key-ordered, and how a hard delete repairs
//! reachability. Everything else (resize trigger, tombstones, probe
//! accounting) is shared.
//!
//! Probe accounting: one probe per slot examined. The home-index computation
//! coincides with examining the home slot, so a hit at home costs 1.

use crate::config::{DeletionMode, TableConfig};
use crate::error::Result;
use crate::hash::{home_index, PolynomialHashBuilder};
use crate::primes::PrimeSequence;
use crate::probe::ProbeResult;
use crate::slot::{empty_buffer, Record, Slot};
use crate::table::{check_record, AssociativeTable};
use core::hash::BuildHasher;
use core::marker::PhantomData;
use log::{debug, trace};

/// How a hard delete restores reachability for the records it may have cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehome {
    /// Vacate and reinsert the contiguous occupied run following the freed
    /// slot. Sufficient when the probe sequence steps one slot at a time.
    FollowingRun,
    /// Vacate and reinsert every record in the table. Required when probe
    /// offsets are not contiguous; costs O(capacity) per delete.
    WholeTable,
}

/// Probe geometry and per-strategy hooks.
pub trait ProbeStrategy {
    /// Short name used in log lines.
    const NAME: &'static str;

    /// When set, every run is kept in ascending key order: inserts bubble
    /// smaller keys toward the home slot, lookups stop at the first larger key.
    const ORDERED: bool = false;

    const REHOME: Rehome;

    /// Index of the `step`-th probe (1-based) from home index `base`.
    /// `probe_index(base, 1, cap) == base`.
    fn probe_index(base: usize, step: usize, capacity: usize) -> usize;
}

enum Lookup {
    Hit { index: usize, probes: usize },
    Miss { probes: usize },
}

#[derive(Debug)]
pub struct OpenAddressingTable<P, S = PolynomialHashBuilder> {
    slots: Box<[Slot]>,
    /// Records retrievable by `get`.
    live: usize,
    /// Live records plus tombstones; drives the resize trigger.
    occupied: usize,
    deletion: DeletionMode,
    primes: PrimeSequence,
    hasher: S,
    _strategy: PhantomData<fn() -> P>,
}

impl<P: ProbeStrategy> OpenAddressingTable<P> {
    pub fn new(deletion: DeletionMode) -> Self {
        Self::with_hasher(deletion, PolynomialHashBuilder)
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, PolynomialHashBuilder)
    }
}

impl<P: ProbeStrategy, S: BuildHasher> OpenAddressingTable<P, S> {
    pub fn with_hasher(deletion: DeletionMode, hasher: S) -> Self {
        Self::from_parts(deletion, PrimeSequence::new(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        let primes = config.sequence()?;
        Ok(Self::from_parts(config.deletion, primes, hasher))
    }

    fn from_parts(deletion: DeletionMode, primes: PrimeSequence, hasher: S) -> Self {
        Self {
            slots: empty_buffer(primes.current()),
            live: 0,
            occupied: 0,
            deletion,
            primes,
            hasher,
            _strategy: PhantomData,
        }
    }

    pub fn deletion_mode(&self) -> DeletionMode {
        self.deletion
    }

    /// Live records plus tombstones.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn tombstones(&self) -> usize {
        self.occupied - self.live
    }

    /// `occupied / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.slots.len() as f64
    }

    /// Read-only view of the backing buffer. Invalidated by the next mutation.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Stored records in buffer order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.slots.iter().filter_map(Slot::record)
    }

    /// Home index of `key` at the current capacity.
    pub fn home(&self, key: &str) -> usize {
        home_index(&self.hasher, key, self.slots.len())
    }

    /// Walk the probe sequence for `key`. Tombstones are stepped over; the
    /// walk ends at a match, an empty slot, a larger key (ordered strategies
    /// only), or after `capacity` steps.
    fn locate(&self, key: &str) -> Lookup {
        let capacity = self.slots.len();
        let base = self.home(key);
        for step in 1..=capacity {
            let index = P::probe_index(base, step, capacity);
            match &self.slots[index] {
                Slot::Empty => return Lookup::Miss { probes: step },
                Slot::Tombstone => {}
                Slot::Occupied(r) => {
                    if r.key == key {
                        return Lookup::Hit {
                            index,
                            probes: step,
                        };
                    }
                    if P::ORDERED && r.key.as_str() > key {
                        return Lookup::Miss { probes: step };
                    }
                }
            }
        }
        Lookup::Miss { probes: capacity }
    }

    /// The shared insert path: resize check first, then placement. Used by
    /// `put`, by resize itself and by hard-delete rehoming, so every
    /// reinserted record is charged to the operation that caused it.
    fn insert_record(&mut self, record: Record) -> usize {
        let mut probes = 0;
        if self.occupied > self.slots.len() / 2 {
            probes += self.resize();
        }
        let mut carried = record;
        loop {
            match self.place(carried) {
                Ok(p) => return probes + p,
                // Only reachable for sequences that visit a fraction of the
                // buffer at tiny capacities (quadratic at 2). Grow and retry.
                Err((unplaced, p)) => {
                    probes += p + self.resize();
                    carried = unplaced;
                }
            }
        }
    }

    /// Write `carried` into the first empty slot on its probe sequence.
    /// Tombstones are never reused. Ordered strategies swap any larger
    /// resident into the carry and keep walking with it.
    fn place(&mut self, mut carried: Record) -> core::result::Result<usize, (Record, usize)> {
        let capacity = self.slots.len();
        let base = self.home(&carried.key);
        for step in 1..=capacity {
            let index = P::probe_index(base, step, capacity);
            let slot = &mut self.slots[index];
            match slot {
                Slot::Empty => {
                    *slot = Slot::Occupied(carried);
                    self.live += 1;
                    self.occupied += 1;
                    return Ok(step);
                }
                Slot::Tombstone => {}
                Slot::Occupied(resident) => {
                    if P::ORDERED && resident.key > carried.key {
                        core::mem::swap(resident, &mut carried);
                    }
                }
            }
        }
        Err((carried, capacity))
    }

    /// Rebuild into the next capacity in the sequence, dropping tombstones.
    /// Returns the scan cost plus every reinsertion's cost.
    fn resize(&mut self) -> usize {
        let old_capacity = self.slots.len();
        let new_capacity = self.primes.next_prime();
        let old = core::mem::replace(&mut self.slots, empty_buffer(new_capacity));
        let tombstones = self.occupied - self.live;
        self.live = 0;
        self.occupied = 0;

        let mut probes = old_capacity;
        let mut moved = 0usize;
        for slot in old.into_vec() {
            if let Slot::Occupied(record) = slot {
                probes += self.insert_record(record);
                moved += 1;
            }
        }
        debug!(
            "{}: resized {} -> {} ({} records moved, {} tombstones flushed, {} probes)",
            P::NAME,
            old_capacity,
            new_capacity,
            moved,
            tombstones,
            probes
        );
        probes
    }

    /// Repair reachability after slot `vacated` was emptied by a hard delete.
    fn rehome(&mut self, vacated: usize) -> usize {
        let capacity = self.slots.len();
        let (displaced, mut probes) = match P::REHOME {
            Rehome::FollowingRun => {
                let mut displaced = Vec::new();
                let mut probes = 0;
                let mut index = vacated;
                for _ in 1..capacity {
                    index = (index + 1) % capacity;
                    probes += 1;
                    match self.slots[index].vacate() {
                        Some(record) => displaced.push(record),
                        None => break,
                    }
                }
                (displaced, probes)
            }
            Rehome::WholeTable => {
                let displaced: Vec<Record> =
                    self.slots.iter_mut().filter_map(Slot::vacate).collect();
                (displaced, capacity)
            }
        };
        self.live -= displaced.len();
        self.occupied -= displaced.len();
        trace!(
            "{}: rehoming {} records after hard delete at {}",
            P::NAME,
            displaced.len(),
            vacated
        );
        for record in displaced {
            probes += self.insert_record(record);
        }
        probes
    }
}

impl<P: ProbeStrategy, S: BuildHasher> AssociativeTable for OpenAddressingTable<P, S> {
    fn put<'v>(&mut self, key: &str, value: &'v str) -> Result<ProbeResult<&'v str>> {
        check_record(key, value)?;
        let probes = self.insert_record(Record::new(key, value));
        Ok(ProbeResult::found(value, probes))
    }

    fn get(&self, key: &str) -> ProbeResult<&str> {
        if key.is_empty() {
            return ProbeResult::absent_key();
        }
        match self.locate(key) {
            Lookup::Hit { index, probes } => ProbeResult::new(
                self.slots[index].record().map(|r| r.value.as_str()),
                probes,
            ),
            Lookup::Miss { probes } => ProbeResult::missing(probes),
        }
    }

    fn remove(&mut self, key: &str) -> ProbeResult<String> {
        if key.is_empty() {
            return ProbeResult::absent_key();
        }
        let (index, probes) = match self.locate(key) {
            Lookup::Hit { index, probes } => (index, probes),
            Lookup::Miss { probes } => return ProbeResult::missing(probes),
        };
        match self.deletion {
            DeletionMode::Soft => {
                // `locate` only reports a hit on an occupied slot.
                let record = match core::mem::replace(&mut self.slots[index], Slot::Tombstone) {
                    Slot::Occupied(record) => record,
                    Slot::Empty | Slot::Tombstone => unreachable!(),
                };
                self.live -= 1;
                ProbeResult::found(record.value, probes)
            }
            DeletionMode::Hard => {
                let record = match self.slots[index].vacate() {
                    Some(record) => record,
                    None => unreachable!(),
                };
                self.live -= 1;
                self.occupied -= 1;
                let probes = probes + self.rehome(index);
                ProbeResult::found(record.value, probes)
            }
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        !key.is_empty() && matches!(self.locate(key), Lookup::Hit { .. })
    }

    fn contains_value(&self, value: &str) -> bool {
        self.records().any(|r| r.value == value)
    }

    fn len(&self) -> usize {
        self.live
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}
