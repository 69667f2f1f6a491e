//! Data sources.
//!
//! A `DataSource` is the backing store a controller fetches from. The
//! controller never observes the store directly: it is told what changed
//! through a `MutationNotification` and looks the touched records up.
//!
//! `MemorySource` is an in-memory store that keeps track of the pending
//! notification itself, so it can drive controllers without any persistence.

use crate::config::FetchRequest;
use crate::mutation::MutationNotification;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::Ordering;
use tabula_core::{Error, Record, Result};

/// Identity type of the records of a source.
pub type SourceId<S> = <<S as DataSource>::Record as Record>::Id;

/// A store of records a controller can fetch from.
pub trait DataSource {
    /// The record type.
    type Record: Record + Clone;

    /// Returns the records of `request`'s entity.
    ///
    /// Sources may pre-filter and pre-sort; the controller re-applies the
    /// request's predicate and ordering to whatever comes back.
    fn fetch(&self, request: &FetchRequest<Self::Record>) -> Result<Vec<Self::Record>>;

    /// Returns the current value of one record, if it still exists.
    fn lookup(&self, id: &SourceId<Self>) -> Option<Self::Record>;

    /// Orders two records the way `fetch` returns them.
    ///
    /// Incremental maintenance restores this order before re-applying the
    /// request's sort, so records the sort ties stay where a fresh fetch
    /// would put them. Defaults to identity order.
    fn source_order(&self, a: &Self::Record, b: &Self::Record) -> Ordering {
        a.id().cmp(&b.id())
    }
}

impl<S: DataSource + ?Sized> DataSource for Rc<S> {
    type Record = S::Record;

    fn fetch(&self, request: &FetchRequest<Self::Record>) -> Result<Vec<Self::Record>> {
        (**self).fetch(request)
    }

    fn lookup(&self, id: &SourceId<Self>) -> Option<Self::Record> {
        (**self).lookup(id)
    }

    fn source_order(&self, a: &Self::Record, b: &Self::Record) -> Ordering {
        (**self).source_order(a, b)
    }
}

struct Store<R: Record> {
    records: BTreeMap<R::Id, R>,
    pending: MutationNotification<R::Id>,
}

/// In-memory data source for a single entity.
///
/// Records are kept ordered by identity. Every mutation is recorded in a
/// pending notification, handed out by `take_notification`, the way a
/// persistence context reports its changes when saved.
pub struct MemorySource<R: Record> {
    entity: String,
    store: RefCell<Store<R>>,
}

impl<R: Record + Clone> MemorySource<R> {
    /// Creates an empty source for `entity`.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            store: RefCell::new(Store {
                records: BTreeMap::new(),
                pending: MutationNotification::new(),
            }),
        }
    }

    /// Creates a source holding `records`, with nothing pending.
    pub fn with_records(entity: impl Into<String>, records: impl IntoIterator<Item = R>) -> Result<Self> {
        let source = Self::new(entity);
        for record in records {
            source.insert(record)?;
        }
        source.take_notification();
        Ok(source)
    }

    /// Returns the entity name.
    #[inline]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Stores a new record.
    ///
    /// Fails with `Error::DuplicateIdentity` if the identity is taken.
    pub fn insert(&self, record: R) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let id = record.id();
        if store.records.contains_key(&id) {
            return Err(Error::duplicate_identity(&id));
        }
        store.records.insert(id.clone(), record);
        store.pending.record_insert(id);
        Ok(())
    }

    /// Replaces an existing record. Returns false if it does not exist.
    pub fn update(&self, record: R) -> bool {
        let mut guard = self.store.borrow_mut();
        let store = &mut *guard;
        let id = record.id();
        match store.records.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                store.pending.record_update(id);
                true
            }
            None => false,
        }
    }

    /// Removes a record, returning it.
    pub fn delete(&self, id: &R::Id) -> Option<R> {
        let mut store = self.store.borrow_mut();
        let removed = store.records.remove(id)?;
        store.pending.record_delete(id.clone());
        Some(removed)
    }

    /// Returns a copy of a record.
    pub fn get(&self, id: &R::Id) -> Option<R> {
        self.store.borrow().records.get(id).cloned()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.store.borrow().records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.borrow().records.is_empty()
    }

    /// Returns true if mutations are waiting to be reported.
    pub fn has_pending(&self) -> bool {
        !self.store.borrow().pending.is_empty()
    }

    /// Hands out the pending notification and starts a new one.
    pub fn take_notification(&self) -> MutationNotification<R::Id> {
        core::mem::take(&mut self.store.borrow_mut().pending)
    }
}

impl<R: Record + Clone> DataSource for MemorySource<R> {
    type Record = R;

    fn fetch(&self, request: &FetchRequest<R>) -> Result<Vec<R>> {
        if request.entity() != self.entity {
            return Err(Error::source(alloc::format!(
                "unknown entity '{}' (source holds '{}')",
                request.entity(),
                self.entity
            )));
        }
        let store = self.store.borrow();
        Ok(store
            .records
            .values()
            .filter(|record| request.matches(record))
            .cloned()
            .collect())
    }

    fn lookup(&self, id: &R::Id) -> Option<R> {
        self.get(id)
    }
}
