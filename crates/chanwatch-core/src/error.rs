//! Error types for the Chanwatch Core.

use thiserror::Error;

/// Errors raised while coercing a caller-supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid identifier: {0:?}")]
    Invalid(String),

    #[error("identifier {0} does not fit in a signed 64-bit integer")]
    OutOfRange(u64),
}
