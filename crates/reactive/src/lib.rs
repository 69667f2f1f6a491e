//! Tabula Reactive - Fetched results controllers for Tabula.
//!
//! A `FetchedResultsController` fetches records from a `DataSource`, filters
//! and sorts them in memory, and reports every later mutation of the source to
//! its observers as a `ChangeBatch` of inserts, deletes, moves and updates.
//!
//! # Core Concepts
//!
//! - `FetchRequest`: Entity, fetch predicate and fetch ordering
//! - `DataSource`: The store records are fetched and looked up from
//! - `MutationNotification`: Identities a source inserted, deleted or updated
//! - `Observer`: Optional callbacks for the begin, change and end phases
//! - `BatchDispatcher`: Delivers one batch to every observer, phase by phase
//! - `ControllerRegistry`: Routes notifications to every controller of a source
//!
//! # Example
//!
//! ```ignore
//! use tabula_reactive::{FetchRequest, FetchedResultsController, MemorySource, Observer};
//! use std::rc::Rc;
//!
//! let source = Rc::new(MemorySource::with_records("Note", notes)?);
//! let request = FetchRequest::new("Note").with_predicate(|n: &Note| !n.trashed);
//!
//! let mut controller = FetchedResultsController::new(source.clone(), Some(request));
//! controller.perform_fetch()?;
//!
//! controller.add_observer(Observer::new().on_progressive_change(|_, _, change| {
//!     // Apply `change` to a table view or any other mirrored array
//! }));
//!
//! source.insert(note)?;
//! let batch = controller.apply_mutation(&source.take_notification())?;
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod mutation;
pub mod observer;
pub mod registry;
pub mod source;

pub use config::{ControllerOptions, EmptyBatchPolicy, FetchRequest, RearrangePolicy};
pub use controller::FetchedResultsController;
pub use dispatch::{BatchDispatcher, BatchState};
pub use mutation::MutationNotification;
pub use observer::{Capabilities, EndOfBatch, Observer, ObserverId, ObserverRegistry, PerChange};
pub use registry::{ControllerId, ControllerRegistry, SharedController};
pub use source::{DataSource, MemorySource, SourceId};

// Re-export commonly used types from dependencies
pub use tabula_core::{Error, Record, Result};
pub use tabula_diff::{
    Change, ChangeBatch, ChangeKind, ChangeRecord, Comparator, Predicate, Snapshot, SortDescriptor,
    SortOrder,
};
