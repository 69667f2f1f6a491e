//! Change batches.
//!
//! A `ChangeBatch` is the ordered output of one change cycle. Records must be
//! applied in order; their progressive indexes assume every earlier record has
//! already been applied.

use crate::change::{Change, ChangeKind, ChangeRecord};
use crate::classify::classify;
use crate::reconcile::linearize;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tabula_core::{Error, Record, Result};

/// The ordered changes of one batch.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeBatch<R> {
    records: Vec<ChangeRecord<R>>,
}

impl<R> Default for ChangeBatch<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ChangeBatch<R> {
    /// Creates an empty batch.
    #[inline]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Wraps already linearized records.
    #[inline]
    pub fn from_records(records: Vec<ChangeRecord<R>>) -> Self {
        Self { records }
    }

    /// Returns true if the batch holds no changes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the records in application order.
    #[inline]
    pub fn records(&self) -> &[ChangeRecord<R>] {
        &self.records
    }

    /// Iterates over the records in application order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, ChangeRecord<R>> {
        self.records.iter()
    }

    /// Consumes the batch, returning its records.
    #[inline]
    pub fn into_records(self) -> Vec<ChangeRecord<R>> {
        self.records
    }

    /// Snapshot-relative views of every record, in application order.
    pub fn changes(&self) -> Vec<Change<'_, R>> {
        self.records.iter().map(ChangeRecord::change).collect()
    }

    /// Progressive views of every record, in application order.
    pub fn progressive_changes(&self) -> Vec<Change<'_, R>> {
        self.records.iter().map(ChangeRecord::progressive_change).collect()
    }

    /// Returns the number of records of the given kind.
    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Applies the batch to a mirror array using progressive indexes.
    ///
    /// `make` converts a changed object into the mirror's element type; it is
    /// called for inserts, moves and updates (which replace the element in
    /// place). Fails with `Error::IndexOutOfBounds` when the mirror does not
    /// have the shape the batch was computed for; records before the failing
    /// one stay applied.
    pub fn apply_to<T, F>(&self, mirror: &mut Vec<T>, mut make: F) -> Result<()>
    where
        F: FnMut(&R) -> T,
    {
        for record in &self.records {
            if let Some(index) = record.progressive_index {
                if record.kind != ChangeKind::Update {
                    if index >= mirror.len() {
                        return Err(Error::index_out_of_bounds(index, mirror.len()));
                    }
                    mirror.remove(index);
                }
            }
            if let Some(new_index) = record.progressive_new_index {
                match record.kind {
                    ChangeKind::Update => {
                        let len = mirror.len();
                        let slot = mirror
                            .get_mut(new_index)
                            .ok_or_else(|| Error::index_out_of_bounds(new_index, len))?;
                        *slot = make(&record.object);
                    }
                    _ => {
                        if new_index > mirror.len() {
                            return Err(Error::index_out_of_bounds(new_index, mirror.len()));
                        }
                        mirror.insert(new_index, make(&record.object));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<R: Record + Clone> ChangeBatch<R> {
    /// Classifies and linearizes the changes from `old` to `new`.
    pub fn compute(old: &[R], new: &[R], updated: &HashSet<R::Id>) -> Result<Self> {
        let changes = classify(old, new, updated)?;
        Ok(Self::from_records(linearize(old, new, changes)))
    }
}

impl<'a, R> IntoIterator for &'a ChangeBatch<R> {
    type Item = &'a ChangeRecord<R>;
    type IntoIter = core::slice::Iter<'a, ChangeRecord<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R> IntoIterator for ChangeBatch<R> {
    type Item = ChangeRecord<R>;
    type IntoIter = alloc::vec::IntoIter<ChangeRecord<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
