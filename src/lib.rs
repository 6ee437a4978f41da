//! registrar - account registration over an append-only flat-file store
//!
//! Validates submitted credentials, enforces one account per email,
//! hashes the password with Argon2id, appends the account to a record file
//! and sends best-effort notifications.

pub mod account;
pub mod cli;
pub mod credentials;
pub mod notify;
pub mod registration;
pub mod storage;
pub mod validation;

pub use account::Account;
pub use registration::{RegistrationError, RegistrationService};
