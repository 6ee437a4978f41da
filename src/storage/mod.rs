//! Account record storage
//!
//! An append-only flat file of account records, one per line.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates, no deletes)
//! - One exclusive OS lock per append, released before returning
//! - Readers take no lock
//! - Malformed lines are skipped, never surfaced as errors
//! - Field escaping is lossless for any field content

mod errors;
pub mod escape;
pub mod record;
mod reader;
mod repository;
mod writer;

pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use reader::RecordReader;
pub use repository::{
    AccountRepository, FileAccountStore, InMemoryAccountRepository, DEFAULT_STORE_FILE,
};
pub use writer::RecordWriter;
