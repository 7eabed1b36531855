//! Linear probing: on collision, try the next slot over.
//!
//! Simple and cache friendly, but prone to primary clustering: collisions pile
//! up into long contiguous runs that every later insert in the area must walk.

use crate::open_addressing::{OpenAddressingTable, ProbeStrategy, Rehome};

/// Probe sequence `h, h+1, h+2, ...` modulo capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl ProbeStrategy for Linear {
    const NAME: &'static str = "linear";
    const REHOME: Rehome = Rehome::FollowingRun;

    #[inline]
    fn probe_index(base: usize, step: usize, capacity: usize) -> usize {
        (base + (step - 1) % capacity) % capacity
    }
}

pub type LinearProbingTable<S = crate::hash::PolynomialHashBuilder> =
    OpenAddressingTable<Linear, S>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeletionMode, TableConfig};
    use crate::probe::ProbeResult;
    use crate::slot::Slot;
    use crate::table::AssociativeTable;
    use crate::testing::DigitPrefixBuildHasher;

    fn digits(mode: DeletionMode) -> LinearProbingTable<DigitPrefixBuildHasher> {
        LinearProbingTable::<DigitPrefixBuildHasher>::with_hasher(mode, DigitPrefixBuildHasher)
    }

    #[test]
    fn probe_sequence_wraps() {
        let seq: Vec<usize> = (1..=5).map(|i| Linear::probe_index(3, i, 5)).collect();
        assert_eq!(seq, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn phonebook_soft_delete_scenario() {
        let mut t = LinearProbingTable::new(DeletionMode::Soft);
        t.put("Alice", "111").unwrap();
        t.put("Bob", "222").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.capacity(), 5);

        let r = t.remove("Alice");
        assert_eq!(r.value.as_deref(), Some("111"));
        assert!(r.probes >= 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.capacity(), 5);

        // Alice homes at 3, now a tombstone; the walk ends at the empty slot 4.
        assert_eq!(t.get("Alice"), ProbeResult::missing(2));
        assert_eq!(t.get("Bob").value, Some("222"));
    }

    #[test]
    fn reinsert_after_soft_delete_skips_the_tombstone() {
        let mut t = LinearProbingTable::new(DeletionMode::Soft);
        t.put("Alice", "111").unwrap();
        t.put("Bob", "222").unwrap();
        t.remove("Alice");
        let r = t.put("Alice", "333").unwrap();
        assert_eq!(r.probes, 2);
        assert!(t.slots()[3].is_tombstone());
        assert_eq!(t.slots()[4].key(), Some("Alice"));
        assert_eq!(t.get("Alice"), ProbeResult::found("333", 2));
    }

    #[test]
    fn probes_count_slots_examined_across_the_wrap() {
        let mut t = digits(DeletionMode::Soft);
        assert_eq!(t.put("4a", "1").unwrap().probes, 1);
        assert_eq!(t.put("4b", "2").unwrap().probes, 2);
        assert_eq!(t.put("4c", "3").unwrap().probes, 3);
        assert_eq!(t.slots()[0].key(), Some("4b"));
        assert_eq!(t.slots()[1].key(), Some("4c"));
        assert_eq!(t.get("4c"), ProbeResult::found("3", 3));
        // 4, 0, 1 occupied, 2 empty.
        assert_eq!(t.get("4z"), ProbeResult::missing(4));
    }

    #[test]
    fn hard_delete_rehomes_the_following_run() {
        let mut t = digits(DeletionMode::Hard);
        t.put("4a", "1").unwrap();
        t.put("4b", "2").unwrap();
        t.put("4c", "3").unwrap();

        // locate (1) + walk over 0, 1 and the empty 2 (3) + reinsert 4b (1) and 4c (2).
        let r = t.remove("4a");
        assert_eq!(r, ProbeResult::found("1".to_string(), 7));
        assert_eq!(t.slots()[4].key(), Some("4b"));
        assert_eq!(t.slots()[0].key(), Some("4c"));
        assert!(t.slots()[1].is_empty());
        assert_eq!(t.get("4b"), ProbeResult::found("2", 1));
        assert_eq!(t.get("4c"), ProbeResult::found("3", 2));
        assert_eq!((t.len(), t.occupied()), (2, 2));
    }

    #[test]
    fn hard_delete_leaves_records_before_the_hole_alone() {
        let mut t = LinearProbingTable::<DigitPrefixBuildHasher>::with_config_and_hasher(
            TableConfig::hard().with_initial_capacity(11),
            DigitPrefixBuildHasher,
        )
        .unwrap();
        for k in ["1a", "1b", "1c", "2a"] {
            t.put(k, k).unwrap();
        }
        // [_, 1a, 1b, 1c, 2a, ...]: removing 1b pulls 1c and 2a back by one.
        t.remove("1b");
        let keys: Vec<Option<&str>> = t.slots()[..5].iter().map(Slot::key).collect();
        assert_eq!(keys, vec![None, Some("1a"), Some("1c"), Some("2a"), None]);
    }

    #[test]
    fn miss_under_soft_mode_walks_past_tombstones() {
        let mut t = digits(DeletionMode::Soft);
        t.put("4a", "1").unwrap();
        t.put("4b", "2").unwrap();
        t.remove("4a");
        assert_eq!(t.get("4b"), ProbeResult::found("2", 2));
        assert_eq!(t.remove("4a"), ProbeResult::missing(3));
    }
}
