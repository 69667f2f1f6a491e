//! Error types for Tabula.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for Tabula operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Tabula operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A fetch was attempted without a fetch request.
    #[error("Fetch failed: no fetch request configured")]
    MissingFetchRequest,
    /// The fetch request cannot be executed.
    #[error("Fetch failed: invalid fetch request: {message}")]
    InvalidFetchRequest { message: String },
    /// The backing source failed to produce records.
    #[error("Fetch failed: source error: {message}")]
    Source { message: String },
    /// Positional access past the end of the arranged objects.
    #[error("Index {index} out of bounds for {len} arranged objects")]
    IndexOutOfBounds { index: usize, len: usize },
    /// An identity appeared more than once in one sequence.
    #[error("Identity {identity} appears more than once in one sequence")]
    DuplicateIdentity { identity: String },
    /// A controller was asked to mutate while it was still dispatching a batch.
    #[error("Re-entrant mutation: controller is busy dispatching a batch")]
    ReentrantMutation,
}

impl Error {
    /// Creates an invalid fetch request error.
    pub fn invalid_fetch_request(message: impl Into<String>) -> Self {
        Error::InvalidFetchRequest {
            message: message.into(),
        }
    }

    /// Creates a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Error::Source {
            message: message.into(),
        }
    }

    /// Creates an index out of bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a duplicate identity error from the offending identity.
    pub fn duplicate_identity(identity: &impl core::fmt::Debug) -> Self {
        Error::DuplicateIdentity {
            identity: alloc::format!("{:?}", identity),
        }
    }

    /// Returns true for the fetch error family (missing/invalid request, source failure).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::MissingFetchRequest | Error::InvalidFetchRequest { .. } | Error::Source { .. }
        )
    }
}
