//! # Registration Input Validation
//!
//! Stateless rule engine over raw registration input. Rules run in a fixed
//! order and the first failing rule is reported:
//!
//! 1. Presence of `name`, `email`, `password`
//! 2. Email syntax
//! 3. Password strength (length, uppercase, lowercase, digit)
//! 4. Name shape (trimmed length, forbidden characters)

mod errors;
mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use validator::{
    RegistrationInput, Validator, MAX_NAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
