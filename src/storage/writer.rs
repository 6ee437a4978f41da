//! Locked appends to the record file
//!
//! Each append opens the file, takes an OS-level exclusive lock, writes one
//! complete line, syncs, and releases the lock before returning. The lock
//! never outlives a single append.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::error;

use super::errors::{StorageError, StorageResult};

/// Exclusive lock on an open record file, released on drop.
struct AppendLock<'a> {
    file: &'a File,
    path: &'a Path,
}

impl<'a> AppendLock<'a> {
    fn acquire(file: &'a File, path: &'a Path) -> StorageResult<Self> {
        FileExt::lock_exclusive(file).map_err(|e| {
            StorageError::lock_failed("Cannot acquire file lock for writing", e)
                .with_details(path.display().to_string())
        })?;
        Ok(Self { file, path })
    }
}

impl Drop for AppendLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(self.file) {
            error!(
                path = %self.path.display(),
                error = %e,
                "Failed to release record file lock"
            );
        }
    }
}

/// Appends encoded records to a single file
#[derive(Debug, Clone)]
pub struct RecordWriter {
    path: PathBuf,
}

impl RecordWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one encoded record followed by a line terminator.
    ///
    /// # Errors
    ///
    /// - `REG_STORAGE_OPEN_FAILED` if the file cannot be opened
    /// - `REG_STORAGE_LOCK_FAILED` if the exclusive lock cannot be taken
    /// - `REG_STORAGE_WRITE_FAILED` if the write or sync fails
    pub fn append(&self, encoded: &str) -> StorageResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                StorageError::open_failed("Cannot open file for writing", e)
                    .with_details(self.path.display().to_string())
            })?;

        let _lock = AppendLock::acquire(&file, &self.path)?;

        let mut line = String::with_capacity(encoded.len() + 1);
        line.push_str(encoded);
        line.push('\n');

        // Single write so concurrent readers see either nothing or a whole
        // line in the common case.
        (&file).write_all(line.as_bytes()).map_err(|e| {
            StorageError::write_failed("Failed to append record", e)
                .with_details(self.path.display().to_string())
        })?;

        file.sync_data().map_err(|e| {
            StorageError::write_failed("Failed to sync record file", e)
                .with_details(self.path.display().to_string())
        })?;

        Ok(())
    }
}
