//! # Account
//!
//! The registered account value. Created once by the registration
//! transaction (or decoded from the record file) and never mutated.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use crate::credentials::CredentialHasher;

/// Timestamp layout used in the record file and in notification bodies.
pub const REGISTERED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A registered account
///
/// The credential hash is never serialized and is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    name: String,
    email: String,
    #[serde(skip_serializing)]
    credential_hash: String,
    registered_at: DateTime<Utc>,
}

impl Account {
    /// Build an account. `registered_at` is truncated to whole seconds so the
    /// value matches what the record file can represent.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            registered_at: registered_at.trunc_subsecs(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Opaque output of the password hashing primitive.
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Registration time as `YYYY-MM-DD HH:MM:SS`.
    pub fn registered_at_display(&self) -> String {
        self.registered_at.format(REGISTERED_AT_FORMAT).to_string()
    }

    /// Check a candidate password against this account's stored hash.
    pub fn verify_password(&self, hasher: &CredentialHasher, password: &str) -> bool {
        hasher.verify(password, &self.credential_hash)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("credential_hash", &"<redacted>")
            .field("registered_at", &self.registered_at)
            .finish()
    }
}
