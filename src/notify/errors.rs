//! Notification error types

use thiserror::Error;

/// Result type for notification delivery
pub type NotifyResult<T> = Result<T, NotifyError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Message could not be built or handed to the transport
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Notification timed out after {0} ms")]
    Timeout(u64),

    /// The notifier panicked while sending
    #[error("Notifier panicked")]
    Panicked,
}
