//! # Credential Hashing
//!
//! Argon2id password hashing with fixed cost parameters.
//!
//! Plaintext passwords never leave this module in any form other than
//! a salted, versioned PHC hash string.

mod errors;
mod hasher;

pub use errors::{HashingError, HashingResult};
pub use hasher::{
    CredentialHasher, DEFAULT_MEMORY_COST_KIB, DEFAULT_PARALLELISM, DEFAULT_TIME_COST,
};
