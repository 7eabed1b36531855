//! phonebook: a string-to-string store implemented four ways, to compare
//! collision-resolution strategies by the probes each operation costs.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one capability contract ([`AssociativeTable`]), four engines,
//!   and a probe count on every result so engines can be compared on equal
//!   terms.
//! - Engines:
//!   - [`LinearProbingTable`]: open addressing, next slot over.
//!   - [`OrderedLinearProbingTable`]: linear geometry with every run kept in
//!     ascending key order, so misses stop early.
//!   - [`QuadraticProbingTable`]: open addressing with offsets
//!     `(i-1) + (i-1)^2`.
//!   - [`SeparateChainingTable`]: per-bucket insertion-ordered chains with
//!     caller-driven `enlarge`/`shrink`.
//! - The three open-addressing engines are one generic
//!   [`OpenAddressingTable`] over a [`ProbeStrategy`]; the strategy supplies
//!   probe geometry, ordering, and the hard-delete rehoming policy.
//!
//! Constraints
//! - Single-threaded; every mutation takes `&mut self`.
//! - Keys and values are non-empty strings. The empty string stands for an
//!   absent argument: `put` rejects it, lookups answer it with zero probes.
//! - `put` does not de-duplicate. Two puts of one key store two records.
//! - Capacities are always members of one prime sequence (see [`primes`]).
//!
//! Resize and deletion
//! - Open addressing rebuilds into the next prime before any insert that
//!   finds `occupied > capacity / 2`; `occupied` counts tombstones, so soft
//!   deletes eventually force a rebuild that flushes them.
//! - Soft delete leaves a tombstone. Hard delete vacates and rehomes: the
//!   following run for linear geometries, the whole table for quadratic.
//! - Rebuild and rehoming costs are charged to the operation that caused them.
//!
//! Hashing
//! - Default hasher is the 31-multiplier string polynomial with the sign bit
//!   masked ([`PolynomialHashBuilder`]); any `BuildHasher` may be supplied.
//!   Key bytes are fed with one `write` call so custom hashers see exactly
//!   the key.

mod config;
mod error;
pub mod hash;
pub mod linear;
pub mod open_addressing;
mod open_addressing_proptest;
pub mod ordered_linear;
pub mod primes;
mod probe;
pub mod quadratic;
pub mod separate_chaining;
mod slot;
mod table;
mod testing;

// Public surface
pub use config::{DeletionMode, TableConfig};
pub use error::{Result, TableError};
pub use hash::PolynomialHashBuilder;
pub use linear::LinearProbingTable;
pub use open_addressing::{OpenAddressingTable, ProbeStrategy, Rehome};
pub use ordered_linear::OrderedLinearProbingTable;
pub use primes::PrimeSequence;
pub use probe::ProbeResult;
pub use quadratic::QuadraticProbingTable;
pub use separate_chaining::SeparateChainingTable;
pub use slot::{Record, Slot};
pub use table::AssociativeTable;
