//! Registration error types

use thiserror::Error;

use crate::credentials::HashingError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Result type for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Why a registration attempt failed.
///
/// Notification failures are deliberately absent: they are logged and
/// never reach the caller.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Input rejected before any side effect
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An account with this email already exists; nothing was written
    #[error("User with email {email} already exists")]
    DuplicateAccount { email: String },

    /// Record file could not be read or written; the account is not registered
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Hashing primitive failed; environment problem, not retried
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

impl RegistrationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::Validation(_) => "REG_VALIDATION_FAILED",
            RegistrationError::DuplicateAccount { .. } => "REG_DUPLICATE_ACCOUNT",
            RegistrationError::Storage(e) => e.code().code(),
            RegistrationError::Hashing(_) => "REG_HASHING_FAILED",
        }
    }

    /// Whether the caller can fix this by changing the input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistrationError::Validation(_) | RegistrationError::DuplicateAccount { .. }
        )
    }
}
