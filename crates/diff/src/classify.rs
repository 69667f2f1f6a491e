//! Change classification.
//!
//! Compares two arranged sequences by identity and reports one record per
//! changed object. Objects sitting at the same position in both sequences and
//! not flagged as updated produce nothing.

use crate::change::ChangeRecord;
use crate::snapshot::index_by_identity;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tabula_core::{Record, Result};

/// Classifies the differences between `old` and `new`.
///
/// - present only in `old`: `Delete` at its old position
/// - present only in `new`: `Insert` at its new position
/// - present in both at different positions: `Move` (even if also updated)
/// - present in both at the same position and in `updated`: `Update`
///
/// Indexes refer to `old` and `new` respectively. Records come out deletes
/// first (in `old` order), then the rest in `new` order; `linearize` imposes
/// the application order.
///
/// Fails with `Error::DuplicateIdentity` if either sequence repeats an identity.
pub fn classify<R>(old: &[R], new: &[R], updated: &HashSet<R::Id>) -> Result<Vec<ChangeRecord<R>>>
where
    R: Record + Clone,
{
    let old_positions = index_by_identity(old)?;
    let new_positions = index_by_identity(new)?;

    let mut changes = Vec::new();

    for (index, record) in old.iter().enumerate() {
        if !new_positions.contains_key(&record.id()) {
            changes.push(ChangeRecord::delete(record.clone(), index));
        }
    }

    for (new_index, record) in new.iter().enumerate() {
        let id = record.id();
        match old_positions.get(&id) {
            None => changes.push(ChangeRecord::insert(record.clone(), new_index)),
            Some(&index) if index != new_index => {
                changes.push(ChangeRecord::moved(record.clone(), index, new_index))
            }
            Some(&index) if updated.contains(&id) => {
                changes.push(ChangeRecord::update(record.clone(), index))
            }
            Some(_) => {}
        }
    }

    Ok(changes)
}
