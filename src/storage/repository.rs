//! Account repository
//!
//! The only operations the registration flow needs: append, existence
//! check, lookup by email. The store never updates or deletes a record and
//! does not enforce email uniqueness itself.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, error};

use super::errors::{StorageError, StorageResult};
use super::reader::RecordReader;
use super::record;
use super::writer::RecordWriter;
use crate::account::Account;

/// Default record file name inside the data directory
pub const DEFAULT_STORE_FILE: &str = "users.txt";

/// Account repository trait
///
/// Abstracts storage of accounts for the registration service.
pub trait AccountRepository: Send + Sync {
    /// Append a new account record
    fn append(&self, account: &Account) -> StorageResult<()>;

    /// First stored account with exactly this email
    fn find_by_email(&self, email: &str) -> StorageResult<Option<Account>>;

    /// Whether any stored account has exactly this email
    fn exists(&self, email: &str) -> StorageResult<bool> {
        Ok(self.find_by_email(email)?.is_some())
    }
}

/// Append-only flat-file account store
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    writer: RecordWriter,
    reader: RecordReader,
}

impl FileAccountStore {
    /// Opens the store at `<data_dir>/<file_name>`.
    ///
    /// Creates `data_dir` if missing. The record file itself is created by
    /// the first append.
    pub fn open(data_dir: &Path, file_name: &str) -> StorageResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StorageError::open_failed("Cannot create data directory", e)
                    .with_details(data_dir.display().to_string())
            })?;
            debug!(path = %data_dir.display(), "Created data directory");
        }

        let path: PathBuf = data_dir.join(file_name);
        Ok(Self {
            writer: RecordWriter::new(&path),
            reader: RecordReader::new(path),
        })
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        self.reader.path()
    }

    /// All well-formed records in file order
    pub fn accounts(&self) -> StorageResult<Vec<Account>> {
        self.reader.read_all()
    }
}

impl AccountRepository for FileAccountStore {
    fn append(&self, account: &Account) -> StorageResult<()> {
        match self.writer.append(&record::encode(account)) {
            Ok(()) => {
                debug!(email = %account.email(), "Account record appended");
                Ok(())
            }
            Err(e) => {
                error!(email = %account.email(), error = %e, "Failed to save account");
                Err(e)
            }
        }
    }

    fn find_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        self.reader.find_by_email(email).map_err(|e| {
            error!(email = %email, error = %e, "Failed to find account by email");
            e
        })
    }
}

/// In-memory account repository for testing and embedding
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, duplicates included
    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn append(&self, account: &Account) -> StorageResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StorageError::lock_poisoned())?;
        accounts.push(account.clone());
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StorageError::lock_poisoned())?;
        Ok(accounts.iter().find(|a| a.email() == email).cloned())
    }
}
