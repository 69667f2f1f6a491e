//! Progressive index reconciliation.
//!
//! `linearize` orders classified changes and assigns each one the indexes it
//! has in a mirror array that already received every earlier change of the
//! batch.
//!
//! Canonical order:
//!
//! 1. Deletes, by descending original index. Removing from the back keeps the
//!    remaining original indexes valid, so `progressive_index == index`.
//! 2. Inserts and Moves, by ascending new index. A Move is removed from its
//!    current working position first. The object is then placed right after
//!    the object preceding it in the new sequence, or at the front when it is
//!    the first one.
//! 3. Updates, by ascending index. The working copy equals the new sequence
//!    by now, so both progressive indexes equal the new index.
//!
//! Every object of the working copy gets an ordering key up front. Survivors
//! of the deletes are `(rank + 1, 0)`, in old order. A placed object takes
//! the key right after its predecessor in the new sequence, `(major, minor + 1)`;
//! consecutive placements after one survivor form a run with rising `minor`,
//! so no other key ever falls between a placement and its predecessor. A
//! working position is then the number of present keys below an object's key,
//! counted with a Fenwick tree.

use crate::change::{ChangeKind, ChangeRecord};
use alloc::vec;
use alloc::vec::Vec;
use tabula_core::Record;

type Key = (usize, usize);

/// Orders `changes` for sequential application and fills in their
/// progressive indexes.
///
/// `changes` must be the classification of `old` against `new` (see
/// `classify`), whose indexes are trusted here. Objects without a record sit
/// at the same index in both sequences.
pub fn linearize<R: Record>(
    old: &[R],
    new: &[R],
    changes: Vec<ChangeRecord<R>>,
) -> Vec<ChangeRecord<R>> {
    let total = changes.len();
    let mut deletes = Vec::new();
    let mut placements = Vec::new();
    let mut updates = Vec::new();
    for change in changes {
        match change.kind {
            ChangeKind::Delete => deletes.push(change),
            ChangeKind::Insert | ChangeKind::Move => placements.push(change),
            ChangeKind::Update => updates.push(change),
        }
    }
    deletes.sort_by(|a, b| b.index.cmp(&a.index));
    placements.sort_by_key(|c| c.new_index);
    updates.sort_by_key(|c| c.new_index);

    // Rank of each old position once the deletes are applied
    let mut deleted = vec![false; old.len()];
    for change in &deletes {
        if let Some(gone) = change.index.and_then(|index| deleted.get_mut(index)) {
            *gone = true;
        }
    }
    let mut ranks = Vec::with_capacity(old.len());
    let mut survivors = 0;
    for gone in &deleted {
        ranks.push(survivors);
        if !gone {
            survivors += 1;
        }
    }
    let survivor_key = |index: usize| (ranks.get(index).copied().unwrap_or(survivors) + 1, 0);

    let mut placed_at = vec![None; new.len()];
    for (slot, change) in placements.iter().enumerate() {
        if let Some(entry) = change.new_index.and_then(|t| placed_at.get_mut(t)) {
            *entry = Some(slot);
        }
    }
    let mut placement_keys: Vec<Key> = vec![(0, 0); placements.len()];
    let mut previous: Key = (0, 0);
    for (t, placed) in placed_at.iter().enumerate() {
        previous = match placed {
            Some(slot) => {
                let key = (previous.0, previous.1 + 1);
                placement_keys[*slot] = key;
                key
            }
            None => survivor_key(t),
        };
    }

    let mut universe: Vec<Key> = (1..=survivors)
        .map(|rank| (rank, 0))
        .chain(placement_keys.iter().copied())
        .collect();
    universe.sort_unstable();
    universe.dedup();
    let slot_of = |key: Key| universe.binary_search(&key).unwrap_or_else(|slot| slot);

    let mut present = Fenwick::new(universe.len());
    for rank in 1..=survivors {
        present.add(slot_of((rank, 0)), 1);
    }

    let mut ordered = Vec::with_capacity(total);

    for mut change in deletes {
        change.progressive_index = change.index;
        ordered.push(change);
    }

    for (slot, mut change) in placements.into_iter().enumerate() {
        if change.kind == ChangeKind::Move {
            if let Some(index) = change.index {
                let from = slot_of(survivor_key(index));
                change.progressive_index = Some(present.prefix(from));
                present.add(from, -1);
            }
        }
        let to = slot_of(placement_keys[slot]);
        change.progressive_new_index = Some(present.prefix(to));
        present.add(to, 1);
        ordered.push(change);
    }

    for mut change in updates {
        change.progressive_index = change.new_index;
        change.progressive_new_index = change.new_index;
        ordered.push(change);
    }

    tracing::trace!(changes = ordered.len(), "linearized change batch");
    ordered
}

/// Counts of present keys, by compressed key slot.
struct Fenwick {
    tree: Vec<isize>,
}

impl Fenwick {
    fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    fn add(&mut self, slot: usize, delta: isize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Number of present keys in slots `0..slot`.
    fn prefix(&self, slot: usize) -> usize {
        let mut i = slot.min(self.tree.len() - 1);
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum.max(0) as usize
    }
}
