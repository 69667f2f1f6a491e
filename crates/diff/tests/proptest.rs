//! Property-based tests for tabula-diff using proptest.

use proptest::prelude::*;
use std::collections::BTreeSet;
use tabula_core::{ids_of, Record};
use tabula_diff::{classify, project, ChangeBatch, ChangeKind, HashSet};

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: u16,
    rank: u8,
}

impl Record for Item {
    type Id = u16;

    fn id(&self) -> u16 {
        self.id
    }
}

/// A duplicate-free sequence of items in random order.
fn sequence(max_len: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::btree_set(0u16..64, 0..max_len)
        .prop_flat_map(|ids| {
            let items: Vec<Item> = ids.into_iter().map(|id| Item { id, rank: 0 }).collect();
            Just(items).prop_shuffle()
        })
        .prop_flat_map(|items| {
            let len = items.len();
            (Just(items), prop::collection::vec(any::<u8>(), len))
        })
        .prop_map(|(mut items, ranks)| {
            for (item, rank) in items.iter_mut().zip(ranks) {
                item.rank = rank;
            }
            items
        })
}

fn ids(items: &[Item]) -> Vec<u16> {
    ids_of(items)
}

proptest! {
    /// Applying a batch record by record to the old sequence yields the new one.
    #[test]
    fn progressive_applicability(
        old in sequence(24),
        new in sequence(24),
        updated in prop::collection::hash_set(0u16..64, 0..16)
    ) {
        let updated: HashSet<u16> = updated.into_iter().collect();
        let batch = ChangeBatch::compute(&old, &new, &updated).unwrap();

        let mut mirror = ids(&old);
        batch.apply_to(&mut mirror, |item| item.id).unwrap();
        prop_assert_eq!(mirror, ids(&new));
    }

    /// Plain indexes always point into the before/after snapshots.
    #[test]
    fn index_duality(old in sequence(24), new in sequence(24)) {
        let batch = ChangeBatch::compute(&old, &new, &HashSet::new()).unwrap();
        for record in &batch {
            match record.kind {
                ChangeKind::Insert => {
                    prop_assert_eq!(new[record.new_index.unwrap()].id, record.object.id);
                    prop_assert!(record.index.is_none());
                }
                ChangeKind::Delete => {
                    prop_assert_eq!(old[record.index.unwrap()].id, record.object.id);
                    prop_assert!(record.new_index.is_none());
                }
                ChangeKind::Move | ChangeKind::Update => {
                    prop_assert_eq!(old[record.index.unwrap()].id, record.object.id);
                    prop_assert_eq!(new[record.new_index.unwrap()].id, record.object.id);
                }
            }
            prop_assert!(record.is_linearized());
        }
    }

    /// Every identity is reported at most once per batch.
    #[test]
    fn one_record_per_identity(
        old in sequence(24),
        new in sequence(24),
        updated in prop::collection::hash_set(0u16..64, 0..16)
    ) {
        let updated: HashSet<u16> = updated.into_iter().collect();
        let batch = ChangeBatch::compute(&old, &new, &updated).unwrap();
        let distinct: BTreeSet<u16> = batch.iter().map(|r| r.object.id).collect();
        prop_assert_eq!(distinct.len(), batch.len());
    }

    /// Same inputs, same batch.
    #[test]
    fn deterministic(old in sequence(24), new in sequence(24)) {
        let first = ChangeBatch::compute(&old, &new, &HashSet::new()).unwrap();
        let second = ChangeBatch::compute(&old, &new, &HashSet::new()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A sequence diffed against itself with no updates yields nothing.
    #[test]
    fn no_op_suppression(old in sequence(24)) {
        let changes = classify(&old, &old, &HashSet::new()).unwrap();
        prop_assert!(changes.is_empty());
    }

    /// Projection without predicate or comparator is the identity.
    #[test]
    fn projection_round_trip(fetched in sequence(24)) {
        prop_assert_eq!(project(&fetched, None, None), fetched);
    }

    /// Sorted projection is ordered and keeps fetched order among ties.
    #[test]
    fn projection_sort_is_stable(fetched in sequence(24)) {
        let by_rank = tabula_diff::comparator(|a: &Item, b: &Item| (a.rank / 64).cmp(&(b.rank / 64)));
        let arranged = project(&fetched, None, Some(&by_rank));
        for pair in arranged.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.rank / 64 <= b.rank / 64);
            if a.rank / 64 == b.rank / 64 {
                let pos_a = fetched.iter().position(|i| i.id == a.id).unwrap();
                let pos_b = fetched.iter().position(|i| i.id == b.id).unwrap();
                prop_assert!(pos_a < pos_b);
            }
        }
    }
}
