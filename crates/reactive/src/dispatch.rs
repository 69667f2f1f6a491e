//! Batch dispatch.
//!
//! Drives the observers of a controller through one batch:
//! `Idle -> BatchOpen -> Emitting -> BatchClosed`. Every phase reaches all
//! observers, in registration order, before the next phase starts. Observers
//! only ever see the pre-batch snapshot.

use crate::config::EmptyBatchPolicy;
use crate::observer::RegisteredObserver;
use tabula_core::Record;
use tabula_diff::{Change, ChangeBatch, Snapshot};

/// Progress of a dispatcher through its batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    BatchOpen,
    Emitting,
    BatchClosed,
}

/// Delivers one batch to a set of observers.
pub struct BatchDispatcher<'a, R: Record> {
    observers: &'a [RegisteredObserver<R>],
    snapshot: &'a Snapshot<R>,
    state: BatchState,
}

impl<'a, R: Record> BatchDispatcher<'a, R> {
    /// Creates a dispatcher over `observers`, exposing `snapshot` to them.
    pub fn new(observers: &'a [RegisteredObserver<R>], snapshot: &'a Snapshot<R>) -> Self {
        Self {
            observers,
            snapshot,
            state: BatchState::Idle,
        }
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Runs the whole batch: begin, every change, end.
    ///
    /// Empty batches are skipped entirely under `EmptyBatchPolicy::Suppress`.
    /// Returns the final state (`Idle` when skipped, `BatchClosed` otherwise).
    pub fn dispatch(mut self, batch: &ChangeBatch<R>, policy: EmptyBatchPolicy) -> BatchState {
        if batch.is_empty() && policy == EmptyBatchPolicy::Suppress {
            return self.state;
        }
        self.begin();
        for record in batch {
            self.emit(&record.change(), &record.progressive_change());
        }
        self.end(batch);
        self.state
    }

    fn begin(&mut self) {
        debug_assert_eq!(self.state, BatchState::Idle);
        self.state = BatchState::BatchOpen;
        for observer in self.observers {
            observer.will_begin(self.snapshot);
        }
    }

    fn emit(&mut self, change: &Change<'_, R>, progressive: &Change<'_, R>) {
        debug_assert!(matches!(self.state, BatchState::BatchOpen | BatchState::Emitting));
        self.state = BatchState::Emitting;
        tracing::trace!(
            kind = %change.kind,
            index = ?change.index,
            new_index = ?change.new_index,
            progressive_index = ?progressive.index,
            progressive_new_index = ?progressive.new_index,
            "dispatching change"
        );
        for observer in self.observers {
            observer.did_change(self.snapshot, change, progressive);
        }
    }

    fn end(&mut self, batch: &ChangeBatch<R>) {
        debug_assert!(matches!(self.state, BatchState::BatchOpen | BatchState::Emitting));
        self.state = BatchState::BatchClosed;
        if self.observers.is_empty() {
            return;
        }
        let changes = batch.changes();
        let progressive = batch.progressive_changes();
        for observer in self.observers {
            observer.did_end(self.snapshot, &changes, &progressive);
        }
    }
}
