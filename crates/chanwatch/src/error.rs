//! Error types for the Database façade.

use chanwatch_core::IdError;
use chanwatch_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Database operations.
///
/// Storage failures pass through untouched. A missing record is never an
/// error; it comes back as `None` or an empty `Vec`.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Storage error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller handed us an id that is not an integer.
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdError),
}

/// Result type for Database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
