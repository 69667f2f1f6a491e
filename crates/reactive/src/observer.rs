//! Observers of controller batches.
//!
//! An `Observer` is a set of optional callback slots. When several slots
//! cover the same moment of a batch, only the one with the most arguments is
//! used:
//!
//! - per change: `on_progressive_change` over `on_change`
//! - end of batch: `on_end_progressive` over `on_end_changes` over `on_did_end`
//!
//! The choice is made once, when the observer is registered, and stored as
//! its `Capabilities`.

use alloc::boxed::Box;
use alloc::vec::Vec;
use tabula_core::Record;
use tabula_diff::{Change, Snapshot};

/// Unique identifier for a registered observer.
pub type ObserverId = u64;

/// Callback without arguments beyond the snapshot (begin and end signals).
pub type SignalCallback<R> = Box<dyn Fn(&Snapshot<R>)>;

/// Callback receiving one snapshot-relative change.
pub type ChangeCallback<R> = Box<dyn Fn(&Snapshot<R>, &Change<'_, R>)>;

/// Callback receiving one change as snapshot-relative and progressive views.
pub type ProgressiveChangeCallback<R> = Box<dyn Fn(&Snapshot<R>, &Change<'_, R>, &Change<'_, R>)>;

/// Callback receiving every change of the batch.
pub type ChangesCallback<R> = Box<dyn Fn(&Snapshot<R>, &[Change<'_, R>])>;

/// Callback receiving every change of the batch in both views.
pub type ProgressiveChangesCallback<R> = Box<dyn Fn(&Snapshot<R>, &[Change<'_, R>], &[Change<'_, R>])>;

/// Which per-change callback an observer receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerChange {
    None,
    Single,
    Progressive,
}

/// Which end-of-batch callback an observer receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndOfBatch {
    None,
    Signal,
    Changes,
    Progressive,
}

/// The callbacks an observer is sent, resolved at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub will_begin: bool,
    pub per_change: PerChange,
    pub end: EndOfBatch,
}

/// A set of optional batch callbacks.
///
/// Every callback receives the controller's snapshot as it was before the
/// batch, so indexes of snapshot-relative changes can be resolved against it.
pub struct Observer<R: Record> {
    will_begin: Option<SignalCallback<R>>,
    change: Option<ChangeCallback<R>>,
    progressive_change: Option<ProgressiveChangeCallback<R>>,
    did_end: Option<SignalCallback<R>>,
    end_changes: Option<ChangesCallback<R>>,
    end_progressive: Option<ProgressiveChangesCallback<R>>,
}

impl<R: Record> Default for Observer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Observer<R> {
    /// Creates an observer with no callbacks.
    pub fn new() -> Self {
        Self {
            will_begin: None,
            change: None,
            progressive_change: None,
            did_end: None,
            end_changes: None,
            end_progressive: None,
        }
    }

    /// Called before the first change of a batch.
    pub fn on_will_begin<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>) + 'static,
    {
        self.will_begin = Some(Box::new(f));
        self
    }

    /// Called for each change, with indexes relative to the snapshots.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>, &Change<'_, R>) + 'static,
    {
        self.change = Some(Box::new(f));
        self
    }

    /// Called for each change with both index views. Takes precedence over
    /// `on_change`.
    pub fn on_progressive_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>, &Change<'_, R>, &Change<'_, R>) + 'static,
    {
        self.progressive_change = Some(Box::new(f));
        self
    }

    /// Called after the last change of a batch, when neither
    /// `on_end_changes` nor `on_end_progressive` is set.
    pub fn on_did_end<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>) + 'static,
    {
        self.did_end = Some(Box::new(f));
        self
    }

    /// Called after the last change with the whole batch. Takes precedence
    /// over `on_did_end`.
    pub fn on_end_changes<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>, &[Change<'_, R>]) + 'static,
    {
        self.end_changes = Some(Box::new(f));
        self
    }

    /// Called after the last change with the whole batch in both views.
    /// Takes precedence over every other end callback.
    pub fn on_end_progressive<F>(mut self, f: F) -> Self
    where
        F: Fn(&Snapshot<R>, &[Change<'_, R>], &[Change<'_, R>]) + 'static,
    {
        self.end_progressive = Some(Box::new(f));
        self
    }

    /// Resolves which callbacks this observer is sent.
    pub fn capabilities(&self) -> Capabilities {
        let per_change = if self.progressive_change.is_some() {
            PerChange::Progressive
        } else if self.change.is_some() {
            PerChange::Single
        } else {
            PerChange::None
        };
        let end = if self.end_progressive.is_some() {
            EndOfBatch::Progressive
        } else if self.end_changes.is_some() {
            EndOfBatch::Changes
        } else if self.did_end.is_some() {
            EndOfBatch::Signal
        } else {
            EndOfBatch::None
        };
        Capabilities {
            will_begin: self.will_begin.is_some(),
            per_change,
            end,
        }
    }
}

/// An observer with its id and resolved capabilities.
pub struct RegisteredObserver<R: Record> {
    id: ObserverId,
    capabilities: Capabilities,
    observer: Observer<R>,
}

impl<R: Record> RegisteredObserver<R> {
    /// Returns the observer ID.
    #[inline]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Returns the capabilities resolved at registration.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn will_begin(&self, snapshot: &Snapshot<R>) {
        if let Some(f) = &self.observer.will_begin {
            f(snapshot);
        }
    }

    pub(crate) fn did_change(&self, snapshot: &Snapshot<R>, change: &Change<'_, R>, progressive: &Change<'_, R>) {
        match self.capabilities.per_change {
            PerChange::Progressive => {
                if let Some(f) = &self.observer.progressive_change {
                    f(snapshot, change, progressive);
                }
            }
            PerChange::Single => {
                if let Some(f) = &self.observer.change {
                    f(snapshot, change);
                }
            }
            PerChange::None => {}
        }
    }

    pub(crate) fn did_end(&self, snapshot: &Snapshot<R>, changes: &[Change<'_, R>], progressive: &[Change<'_, R>]) {
        match self.capabilities.end {
            EndOfBatch::Progressive => {
                if let Some(f) = &self.observer.end_progressive {
                    f(snapshot, changes, progressive);
                }
            }
            EndOfBatch::Changes => {
                if let Some(f) = &self.observer.end_changes {
                    f(snapshot, changes);
                }
            }
            EndOfBatch::Signal => {
                if let Some(f) = &self.observer.did_end {
                    f(snapshot);
                }
            }
            EndOfBatch::None => {}
        }
    }
}

/// Observers of one controller, kept in registration order.
pub struct ObserverRegistry<R: Record> {
    observers: Vec<RegisteredObserver<R>>,
    next_id: ObserverId,
}

impl<R: Record> Default for ObserverRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ObserverRegistry<R> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers an observer and returns its ID.
    pub fn register(&mut self, observer: Observer<R>) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;

        let capabilities = observer.capabilities();
        self.observers.push(RegisteredObserver {
            id,
            capabilities,
            observer,
        });

        id
    }

    /// Unregisters by ID.
    ///
    /// Returns true if the observer was found and removed.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Returns the capabilities of a registered observer.
    pub fn capabilities(&self, id: ObserverId) -> Option<Capabilities> {
        self.observers
            .iter()
            .find(|o| o.id == id)
            .map(RegisteredObserver::capabilities)
    }

    /// Returns the registered observers in registration order.
    #[inline]
    pub fn as_slice(&self) -> &[RegisteredObserver<R>] {
        &self.observers
    }

    /// Returns the number of registered observers.
    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if there are no observers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Returns all observer IDs in registration order.
    pub fn ids(&self) -> Vec<ObserverId> {
        self.observers.iter().map(RegisteredObserver::id).collect()
    }

    /// Removes every observer.
    pub fn clear(&mut self) {
        self.observers.clear();
    }
}
