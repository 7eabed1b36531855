#![cfg(test)]

// Property tests for every engine, kept inside the crate so they can use the
// test hashers and inspect slot buffers.

use crate::config::DeletionMode;
use crate::linear::Linear;
use crate::open_addressing::{OpenAddressingTable, ProbeStrategy};
use crate::ordered_linear::OrderedLinear;
use crate::primes::PrimeSequence;
use crate::quadratic::Quadratic;
use crate::separate_chaining::SeparateChainingTable;
use crate::slot::Slot;
use crate::table::AssociativeTable;
use crate::testing::ConstBuildHasher;
use core::hash::BuildHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

// Pool-indexed operations so shrinking walks toward earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, String),
    Get(usize),
    Remove(usize),
    ContainsValue(String),
    AbsentKey,
    Enlarge,
    Shrink,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{1,4}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), "[0-9]{1,3}").prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            3 => idx.clone().prop_map(Op::Remove),
            1 => "[0-9]{1,3}".prop_map(Op::ContainsValue),
            1 => Just(Op::AbsentKey),
            1 => Just(Op::Enlarge),
            1 => Just(Op::Shrink),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Duplicates are allowed, so the model keeps every value stored per key.
type Model = HashMap<String, Vec<String>>;

fn model_len(model: &Model) -> usize {
    model.values().map(Vec::len).sum()
}

/// Replays `ops` against `sut` and a multiset model. `resize` applies the
/// caller-driven capacity ops (a no-op for self-resizing tables); `check`
/// asserts engine-specific invariants after every step.
fn drive<T, R, C>(
    sut: &mut T,
    pool: &[String],
    ops: Vec<Op>,
    mut resize: R,
    mut check: C,
) -> Result<(), TestCaseError>
where
    T: AssociativeTable,
    R: FnMut(&mut T, bool),
    C: FnMut(&T) -> Result<(), TestCaseError>,
{
    let mut model = Model::new();
    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = &pool[i];
                let r = sut.put(k, &v).expect("non-empty key and value");
                prop_assert_eq!(r.value, Some(v.as_str()));
                prop_assert!(r.probes >= 1);
                model.entry(k.clone()).or_default().push(v);
            }
            Op::Get(i) => {
                let k = &pool[i];
                let r = sut.get(k);
                prop_assert!(r.probes >= 1);
                match model.get(k) {
                    Some(vals) => {
                        let got = r.value.map(str::to_owned);
                        prop_assert!(got.map_or(false, |g| vals.contains(&g)));
                        prop_assert!(sut.contains_key(k));
                    }
                    None => {
                        prop_assert_eq!(r.value, None);
                        prop_assert!(!sut.contains_key(k));
                    }
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let r = sut.remove(k);
                prop_assert!(r.probes >= 1);
                match model.get_mut(k) {
                    Some(vals) => {
                        let at = r
                            .value
                            .as_ref()
                            .and_then(|removed| vals.iter().position(|v| v == removed));
                        prop_assert!(at.is_some(), "removed {:?}, stored {:?}", r.value, vals);
                        if let Some(at) = at {
                            vals.remove(at);
                        }
                        if vals.is_empty() {
                            model.remove(k);
                        }
                    }
                    None => prop_assert_eq!(r.value, None),
                }
            }
            Op::ContainsValue(v) => {
                let expected = model.values().flatten().any(|x| *x == v);
                prop_assert_eq!(sut.contains_value(&v), expected);
            }
            Op::AbsentKey => {
                prop_assert_eq!(sut.get("").probes, 0);
                prop_assert_eq!(sut.remove("").probes, 0);
                prop_assert!(sut.put("", "x").is_err());
                prop_assert!(sut.put("x", "").is_err());
            }
            Op::Enlarge => resize(sut, true),
            Op::Shrink => resize(sut, false),
        }

        prop_assert_eq!(sut.len(), model_len(&model));
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(PrimeSequence::is_canonical(sut.capacity()));
        check(sut)?;
    }
    Ok(())
}

/// Every stored record is reachable: the strategy's walk from its home slot
/// meets no empty slot before arriving. Ordered strategies additionally see
/// only keys `<=` the record's own along that walk.
fn check_open_addressing<P, S>(t: &OpenAddressingTable<P, S>) -> Result<(), TestCaseError>
where
    P: ProbeStrategy,
    S: BuildHasher,
{
    let capacity = t.capacity();
    prop_assert!(t.occupied() <= capacity / 2 + 1, "load factor exceeded");
    prop_assert_eq!(t.occupied() - t.tombstones(), t.len());
    if t.deletion_mode() == DeletionMode::Hard {
        prop_assert_eq!(t.tombstones(), 0);
    }
    for (at, slot) in t.slots().iter().enumerate() {
        let Some(record) = slot.record() else { continue };
        let home = t.home(&record.key);
        let mut arrived = false;
        for step in 1..=capacity {
            let index = P::probe_index(home, step, capacity);
            if index == at {
                arrived = true;
                break;
            }
            match &t.slots()[index] {
                Slot::Empty => prop_assert!(false, "{} unreachable from {}", record.key, home),
                Slot::Tombstone => {}
                Slot::Occupied(other) => {
                    if P::ORDERED {
                        prop_assert!(other.key <= record.key, "run out of order");
                    }
                }
            }
        }
        prop_assert!(arrived, "{} never visited by its own probe sequence", record.key);
    }
    Ok(())
}

fn run_open_addressing<P, S>(
    mode: DeletionMode,
    hasher: S,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    P: ProbeStrategy,
    S: BuildHasher,
{
    let mut sut: OpenAddressingTable<P, S> = OpenAddressingTable::with_hasher(mode, hasher);
    let mut last_capacity = sut.capacity();
    drive(
        &mut sut,
        pool,
        ops,
        |_, _| {},
        |t| {
            // Open addressing only ever grows.
            prop_assert!(t.capacity() >= last_capacity);
            last_capacity = t.capacity();
            check_open_addressing(t)
        },
    )
}

// Property: state-machine equivalence with a multiset model for every
// strategy and deletion mode, plus structural invariants after every step:
// - capacity is canonical and never shrinks
// - occupied <= capacity / 2 + 1 (the check runs before each write)
// - no tombstones under hard deletion
// - every record reachable along its own probe sequence; ordered runs sorted
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_open_addressing_state_machine((pool, ops) in arb_scenario()) {
        for mode in [DeletionMode::Soft, DeletionMode::Hard] {
            run_open_addressing::<Linear, _>(mode, crate::PolynomialHashBuilder, &pool, ops.clone())?;
            run_open_addressing::<OrderedLinear, _>(mode, crate::PolynomialHashBuilder, &pool, ops.clone())?;
            run_open_addressing::<Quadratic, _>(mode, crate::PolynomialHashBuilder, &pool, ops.clone())?;
        }
    }
}

// Property: same invariants when every key collides, so all records share
// one probe sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_open_addressing_with_collisions((pool, ops) in arb_scenario()) {
        for mode in [DeletionMode::Soft, DeletionMode::Hard] {
            run_open_addressing::<Linear, _>(mode, ConstBuildHasher, &pool, ops.clone())?;
            run_open_addressing::<OrderedLinear, _>(mode, ConstBuildHasher, &pool, ops.clone())?;
            run_open_addressing::<Quadratic, _>(mode, ConstBuildHasher, &pool, ops.clone())?;
        }
    }
}

// Property: separate chaining agrees with the model, including across
// caller-driven enlarge/shrink. Capacity moves only on those calls.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_separate_chaining_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = SeparateChainingTable::new();
        let mut expected_capacity = sut.capacity();
        let mut seq = PrimeSequence::new();
        drive(
            &mut sut,
            &pool,
            ops,
            |t, grow| {
                if grow {
                    t.enlarge();
                    expected_capacity = seq.next_prime();
                } else {
                    t.shrink();
                    expected_capacity = seq.previous_prime();
                }
            },
            |_| Ok(()),
        )?;
        prop_assert_eq!(sut.capacity(), expected_capacity);
    }
}

fn hard_delete_is_monotone<P: ProbeStrategy>(
    keys: &[String],
    victim: &str,
) -> Result<(), TestCaseError> {
    let mut t: OpenAddressingTable<P> = OpenAddressingTable::new(DeletionMode::Hard);
    for k in keys {
        t.put(k, k).expect("non-empty");
    }
    let before: HashMap<&str, usize> = keys.iter().map(|k| (k.as_str(), t.get(k).probes)).collect();
    let capacity = t.capacity();
    let removed = t.remove(victim);
    prop_assert_eq!(removed.value.as_deref(), Some(victim));
    prop_assert_eq!(t.capacity(), capacity);
    for k in keys.iter().filter(|k| k.as_str() != victim) {
        let after = t.get(k);
        prop_assert_eq!(after.value, Some(k.as_str()));
        prop_assert!(
            after.probes <= before[k.as_str()],
            "{}: {} probes after deleting {}, {} before",
            k,
            after.probes,
            victim,
            before[k.as_str()]
        );
    }
    prop_assert!(!t.contains_key(victim));
    Ok(())
}

// Property: for the linear geometries, a hard delete never makes any other
// key more expensive to find.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_hard_delete_never_lengthens_other_lookups(
        keys in proptest::collection::hash_set("[a-z]{1,6}", 2..40),
        pick in any::<proptest::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let victim = pick.get(&keys).clone();
        hard_delete_is_monotone::<Linear>(&keys, &victim)?;
        hard_delete_is_monotone::<OrderedLinear>(&keys, &victim)?;
    }
}
