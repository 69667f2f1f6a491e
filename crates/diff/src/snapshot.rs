//! Immutable snapshots of fetched and arranged records.
//!
//! A `Snapshot` is what observers see while a batch is dispatched: the state
//! before the batch. Snapshots are never mutated in place; the controller
//! replaces its snapshot wholesale when a batch commits.

use alloc::vec::Vec;
use hashbrown::HashMap;
use tabula_core::{Error, Record, Result};

/// Maps each identity of `records` to its position.
///
/// Fails with `Error::DuplicateIdentity` when an identity occurs twice.
pub fn index_by_identity<R: Record>(records: &[R]) -> Result<HashMap<R::Id, usize>> {
    let mut positions = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let id = record.id();
        if positions.contains_key(&id) {
            return Err(Error::duplicate_identity(&id));
        }
        positions.insert(id, position);
    }
    Ok(positions)
}

/// Fetched and arranged records at one point in time.
#[derive(Clone, Debug)]
pub struct Snapshot<R: Record> {
    fetched: Vec<R>,
    arranged: Vec<R>,
    /// Identity -> position in `arranged`
    positions: HashMap<R::Id, usize>,
}

impl<R: Record> Default for Snapshot<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Record> Snapshot<R> {
    /// Creates an empty snapshot.
    pub fn empty() -> Self {
        Self {
            fetched: Vec::new(),
            arranged: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Creates a snapshot, validating that neither sequence repeats an identity.
    pub fn new(fetched: Vec<R>, arranged: Vec<R>) -> Result<Self> {
        index_by_identity(&fetched)?;
        let positions = index_by_identity(&arranged)?;
        Ok(Self {
            fetched,
            arranged,
            positions,
        })
    }

    /// Records as returned by the source, before filtering and sorting.
    #[inline]
    pub fn fetched(&self) -> &[R] {
        &self.fetched
    }

    /// Records after filtering and sorting.
    #[inline]
    pub fn arranged(&self) -> &[R] {
        &self.arranged
    }

    /// Returns the arranged object at `index`.
    pub fn object_at(&self, index: usize) -> Result<&R> {
        self.arranged
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, self.arranged.len()))
    }

    /// Returns the arranged objects at `indexes`, in the order given.
    ///
    /// Fails on the first out-of-range index.
    pub fn objects_at<I>(&self, indexes: I) -> Result<Vec<&R>>
    where
        I: IntoIterator<Item = usize>,
    {
        indexes.into_iter().map(|index| self.object_at(index)).collect()
    }

    /// Returns the arranged position of the object with identity `id`.
    #[inline]
    pub fn index_of(&self, id: &R::Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns true if an object with identity `id` is arranged.
    #[inline]
    pub fn contains(&self, id: &R::Id) -> bool {
        self.positions.contains_key(id)
    }

    /// Returns the number of arranged objects.
    #[inline]
    pub fn count(&self) -> usize {
        self.arranged.len()
    }

    /// Returns true if nothing is arranged.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arranged.is_empty()
    }
}
