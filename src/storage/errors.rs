//! Storage error types
//!
//! Error codes:
//! - REG_STORAGE_OPEN_FAILED
//! - REG_STORAGE_LOCK_FAILED
//! - REG_STORAGE_WRITE_FAILED
//! - REG_STORAGE_READ_FAILED
//!
//! All storage errors are terminal for the current call and never retried
//! internally.

use std::fmt;
use std::io;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Record file or data directory could not be opened or created
    OpenFailed,
    /// Exclusive write lock could not be acquired or the lock is poisoned
    LockFailed,
    /// Append or flush failed
    WriteFailed,
    /// Record file could not be read
    ReadFailed,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::OpenFailed => "REG_STORAGE_OPEN_FAILED",
            StorageErrorCode::LockFailed => "REG_STORAGE_LOCK_FAILED",
            StorageErrorCode::WriteFailed => "REG_STORAGE_WRITE_FAILED",
            StorageErrorCode::ReadFailed => "REG_STORAGE_READ_FAILED",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error type with code, message and optional context
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    /// Usually the record file path
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>, source: Option<io::Error>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source,
        }
    }

    pub fn open_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::OpenFailed, message, Some(source))
    }

    pub fn lock_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::LockFailed, message, Some(source))
    }

    /// In-process lock poisoned by a panicking holder
    pub fn lock_poisoned() -> Self {
        Self::new(StorageErrorCode::LockFailed, "Lock poisoned", None)
    }

    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::WriteFailed, message, Some(source))
    }

    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::new(StorageErrorCode::ReadFailed, message, Some(source))
    }

    /// Attach context, typically the path that was being accessed
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
