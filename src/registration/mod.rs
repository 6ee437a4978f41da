//! # Registration
//!
//! The registration transaction:
//!
//! ```text
//! Received -> Validated -> UniquenessChecked -> Hashed -> Persisted
//!          -> NotifiedBestEffort -> Completed
//! ```
//!
//! Validation, duplicate detection, hashing and persistence failures end the
//! attempt with a [`RegistrationError`]. Notifications never do.
//!
//! ## Known race
//!
//! The existence check and the append are separate store operations with no
//! lock held across them. Two concurrent registrations for one email can
//! both pass the check and both append. `tests/registration_race.rs` pins
//! this behaviour down.

mod errors;
mod service;

pub use errors::{RegistrationError, RegistrationResult};
pub use service::{RegistrationService, DEFAULT_NOTIFY_TIMEOUT};
