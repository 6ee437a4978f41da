//! Hashing error types

use thiserror::Error;

/// Result type for hashing operations
pub type HashingResult<T> = Result<T, HashingError>;

/// Failure of the underlying hashing primitive.
///
/// Never caused by user input; indicates a misconfigured or broken
/// environment and is not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashingError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Internal error: password hashing failed: {0}")]
    Failed(String),
}
