//! Tabula Core - Record identity and error types shared by the Tabula crates.
//!
//! This crate provides the foundational types for the change engine:
//!
//! - `Record`: Anything carrying a stable identity (a primary key equivalent)
//! - `Identity`: Bound satisfied by every record identity type
//! - `Error`: Error kinds surfaced by fetching, accessors and diffing
//!
//! # Example
//!
//! ```rust
//! use tabula_core::Record;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note {
//!     id: u64,
//!     text: &'static str,
//! }
//!
//! impl Record for Note {
//!     type Id = u64;
//!
//!     fn id(&self) -> u64 {
//!         self.id
//!     }
//! }
//!
//! let note = Note { id: 7, text: "groceries" };
//! assert_eq!(note.id(), 7);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;

pub use error::{Error, Result};
pub use record::{ids_of, Identity, Record};
