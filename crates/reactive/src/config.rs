//! Controller configuration.
//!
//! `FetchRequest` describes what to fetch from a source; `ControllerOptions`
//! selects the dispatch policies of a controller.

use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::{Error, Result};
use tabula_diff::{project, sort_comparator, Comparator, Predicate, SortDescriptor};

/// What to fetch from a data source.
///
/// The fetch predicate and sort are applied by the source (or re-applied by
/// the controller), and define the fetched objects. The in-memory filter and
/// sort of the controller then derive the arranged objects from those.
pub struct FetchRequest<R> {
    entity: String,
    predicate: Option<Predicate<R>>,
    comparator: Option<Comparator<R>>,
}

impl<R> Clone for FetchRequest<R> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            predicate: self.predicate.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> core::fmt::Debug for FetchRequest<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("entity", &self.entity)
            .field("predicate", &self.predicate.is_some())
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

impl<R: 'static> FetchRequest<R> {
    /// Creates a request for every record of `entity`.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            predicate: None,
            comparator: None,
        }
    }

    /// Restricts the request to records matching `predicate`.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + 'static,
    {
        self.predicate = Some(tabula_diff::predicate(predicate));
        self
    }

    /// Orders fetched records with `comparator`.
    pub fn with_comparator(mut self, comparator: Comparator<R>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Orders fetched records by sort descriptors.
    pub fn with_sort_descriptors(mut self, descriptors: Vec<SortDescriptor<R>>) -> Self {
        self.comparator = sort_comparator(descriptors);
        self
    }
}

impl<R> FetchRequest<R> {
    /// Returns the entity name.
    #[inline]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the fetch predicate.
    #[inline]
    pub fn predicate(&self) -> Option<&Predicate<R>> {
        self.predicate.as_ref()
    }

    /// Returns the fetch ordering.
    #[inline]
    pub fn comparator(&self) -> Option<&Comparator<R>> {
        self.comparator.as_ref()
    }

    /// Checks that the request can be executed.
    pub fn validate(&self) -> Result<()> {
        if self.entity.trim().is_empty() {
            return Err(Error::invalid_fetch_request("entity name is empty"));
        }
        Ok(())
    }

    /// Returns true if `record` belongs to the fetched objects.
    pub fn matches(&self, record: &R) -> bool {
        self.predicate.as_ref().map_or(true, |predicate| predicate(record))
    }
}

impl<R: Clone> FetchRequest<R> {
    /// Filters and orders raw source records into the fetched sequence.
    pub fn apply(&self, records: &[R]) -> Vec<R> {
        project(records, self.predicate.as_ref(), self.comparator.as_ref())
    }
}

/// Whether empty batches still signal begin/end to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyBatchPolicy {
    /// Empty batches are silent.
    #[default]
    Suppress,
    /// Observers get begin and end even when nothing changed.
    Notify,
}

/// How changes to the in-memory filter or sort reach observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RearrangePolicy {
    /// The arranged objects are recomputed without a batch.
    #[default]
    Silent,
    /// The recomputation runs through the full diff and dispatch pipeline.
    Dispatch,
}

/// Dispatch policies of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub empty_batch: EmptyBatchPolicy,
    pub rearrange: RearrangePolicy,
}

impl ControllerOptions {
    /// Creates the default options (suppress empty batches, silent rearrange).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the empty batch policy.
    pub fn empty_batch(mut self, policy: EmptyBatchPolicy) -> Self {
        self.empty_batch = policy;
        self
    }

    /// Sets the rearrange policy.
    pub fn rearrange(mut self, policy: RearrangePolicy) -> Self {
        self.rearrange = policy;
        self
    }
}
