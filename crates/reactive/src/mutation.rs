//! Mutation notifications.
//!
//! A `MutationNotification` lists the identities a data source inserted,
//! deleted or updated since the last notification. It is the only input a
//! controller needs to run a batch.

use hashbrown::HashSet;
use tabula_core::Identity;

/// Identities touched in the backing store since the last notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationNotification<I: Identity> {
    /// Identities of newly stored records
    pub inserted: HashSet<I>,
    /// Identities of removed records
    pub deleted: HashSet<I>,
    /// Identities of records whose values changed
    pub updated: HashSet<I>,
}

impl<I: Identity> Default for MutationNotification<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identity> MutationNotification<I> {
    /// Creates an empty notification.
    pub fn new() -> Self {
        Self {
            inserted: HashSet::new(),
            deleted: HashSet::new(),
            updated: HashSet::new(),
        }
    }

    /// Adds inserted identities.
    pub fn with_inserted(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        self.inserted.extend(ids);
        self
    }

    /// Adds deleted identities.
    pub fn with_deleted(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        self.deleted.extend(ids);
        self
    }

    /// Adds updated identities.
    pub fn with_updated(mut self, ids: impl IntoIterator<Item = I>) -> Self {
        self.updated.extend(ids);
        self
    }

    /// Returns true if nothing was touched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }

    /// Returns the total number of touched identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.inserted.len() + self.deleted.len() + self.updated.len()
    }

    /// Records an insertion, coalescing with earlier entries.
    ///
    /// Re-inserting a deleted identity counts as an update.
    pub fn record_insert(&mut self, id: I) {
        if self.deleted.remove(&id) {
            self.updated.insert(id);
        } else {
            self.inserted.insert(id);
        }
    }

    /// Records an update. Updates of pending inserts stay inserts.
    pub fn record_update(&mut self, id: I) {
        if !self.inserted.contains(&id) {
            self.updated.insert(id);
        }
    }

    /// Records a deletion. Deleting a pending insert cancels it.
    pub fn record_delete(&mut self, id: I) {
        if self.inserted.remove(&id) {
            return;
        }
        self.updated.remove(&id);
        self.deleted.insert(id);
    }

    /// Merges a later notification into this one.
    pub fn merge(&mut self, other: MutationNotification<I>) {
        for id in other.deleted {
            self.record_delete(id);
        }
        for id in other.inserted {
            self.record_insert(id);
        }
        for id in other.updated {
            self.record_update(id);
        }
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.inserted.clear();
        self.deleted.clear();
        self.updated.clear();
    }
}
