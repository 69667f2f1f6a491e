//! Controller registry and notification fan-out.
//!
//! This module provides `ControllerRegistry`, which tracks the controllers
//! built over one data source and routes every mutation notification of that
//! source to each of them.

use crate::controller::FetchedResultsController;
use crate::mutation::MutationNotification;
use crate::source::{DataSource, SourceId};
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use tabula_core::{Error, Result};

/// Unique identifier for a registered controller.
pub type ControllerId = u64;

/// A controller shared between its owner and a registry.
pub type SharedController<S> = Rc<RefCell<FetchedResultsController<S>>>;

/// Routes mutation notifications to the controllers of one source.
///
/// Controllers are held weakly: dropping the last strong reference is enough
/// to stop notifications, and stale entries are removed by `cleanup`.
///
/// # Example
///
/// ```ignore
/// use tabula_reactive::{ControllerRegistry, FetchRequest, FetchedResultsController, MemorySource};
/// use std::rc::Rc;
/// use std::cell::RefCell;
///
/// let source = Rc::new(MemorySource::new("Note"));
/// let controller = Rc::new(RefCell::new(FetchedResultsController::new(
///     source.clone(),
///     Some(FetchRequest::new("Note")),
/// )));
/// controller.borrow_mut().perform_fetch()?;
///
/// let mut registry = ControllerRegistry::new();
/// registry.register(&controller);
///
/// source.insert(note)?;
/// registry.notify(&source.take_notification())?;
/// ```
pub struct ControllerRegistry<S: DataSource> {
    controllers: Vec<(ControllerId, Weak<RefCell<FetchedResultsController<S>>>)>,
    next_id: ControllerId,
}

impl<S: DataSource> Default for ControllerRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DataSource> ControllerRegistry<S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a controller and returns its ID.
    pub fn register(&mut self, controller: &SharedController<S>) -> ControllerId {
        let id = self.next_id;
        self.next_id += 1;
        self.controllers.push((id, Rc::downgrade(controller)));
        id
    }

    /// Unregisters a controller by ID.
    ///
    /// Returns true if the controller was found and removed.
    pub fn unregister(&mut self, id: ControllerId) -> bool {
        let before = self.controllers.len();
        self.controllers.retain(|(other, _)| *other != id);
        let removed = self.controllers.len() != before;
        if removed {
            self.cleanup();
        }
        removed
    }

    /// Runs one batch on every live controller, in registration order.
    ///
    /// Returns the number of controllers notified. Fails with
    /// `Error::ReentrantMutation` if a controller is already borrowed, which
    /// happens when an observer tries to re-enter the registry mid-batch.
    /// Controllers after the failing one are not notified.
    pub fn notify(&self, notification: &MutationNotification<SourceId<S>>) -> Result<usize> {
        let mut notified = 0;
        for (id, weak) in &self.controllers {
            let Some(shared) = weak.upgrade() else {
                continue;
            };
            let mut controller = shared.try_borrow_mut().map_err(|_| {
                tracing::warn!(controller = id, "controller busy, notification rejected");
                Error::ReentrantMutation
            })?;
            controller.apply_mutation(notification)?;
            notified += 1;
        }
        tracing::debug!(notified, touched = notification.len(), "routed mutation notification");
        Ok(notified)
    }

    /// Returns the number of live controllers.
    pub fn controller_count(&self) -> usize {
        self.controllers
            .iter()
            .filter(|(_, w)| w.strong_count() > 0)
            .count()
    }

    /// Returns true if no live controller is registered.
    pub fn is_empty(&self) -> bool {
        self.controller_count() == 0
    }

    /// Cleans up stale weak references.
    pub fn cleanup(&mut self) {
        self.controllers.retain(|(_, w)| w.strong_count() > 0);
    }

    /// Clears all registered controllers.
    pub fn clear(&mut self) {
        self.controllers.clear();
    }
}
