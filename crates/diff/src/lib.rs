//! Tabula Diff - Change computation between two arranged snapshots.
//!
//! This crate turns a before and an after snapshot of an ordered, filtered,
//! sorted sequence of records into the list of structural changes needed to
//! bring a mirrored array from one to the other.
//!
//! # Core Concepts
//!
//! - `project`: Filters and stably sorts a fetched sequence into the arranged sequence
//! - `classify`: Diffs two arranged sequences into Insert/Delete/Move/Update records
//! - `linearize`: Orders the records and fills in their progressive indexes
//! - `ChangeBatch`: The ordered result, applicable one record at a time
//! - `Snapshot`: An immutable view of fetched and arranged records
//!
//! # Progressive Indexes
//!
//! The plain `index`/`new_index` of a change refer to the untouched before and
//! after snapshots. A consumer mutating a single array in place needs indexes
//! valid at the moment each change is applied; those are the
//! `progressive_index`/`progressive_new_index` fields.
//!
//! Batches are emitted in a canonical order:
//!
//! 1. Deletes, by descending original index
//! 2. Inserts and Moves, by ascending new index
//! 3. Updates, by ascending index
//!
//! # Example
//!
//! ```ignore
//! use tabula_diff::{ChangeBatch, HashSet};
//!
//! let old = vec![a, b, c, d];
//! let new = vec![d, a, c];
//! let mut updated = HashSet::new();
//! updated.insert(c.id());
//!
//! let batch = ChangeBatch::compute(&old, &new, &updated)?;
//! let mut mirror = old.clone();
//! batch.apply_to(&mut mirror, |record| record.clone())?;
//! assert_eq!(mirror, new);
//! ```

#![no_std]

extern crate alloc;

pub mod batch;
pub mod change;
pub mod classify;
pub mod projection;
pub mod reconcile;
pub mod snapshot;

pub use batch::ChangeBatch;
pub use change::{Change, ChangeKind, ChangeRecord};
pub use classify::classify;
pub use projection::{
    comparator, predicate, project, sort_comparator, Comparator, Predicate, SortDescriptor,
    SortOrder,
};
pub use reconcile::linearize;
pub use snapshot::{index_by_identity, Snapshot};

// Re-export the identity set type used by the public API
pub use hashbrown::{HashMap, HashSet};
