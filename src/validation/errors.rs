//! Validation error types

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The first registration rule that the input violated.
///
/// Messages are user-facing; none of them echo the password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were empty, in `name, email, password` order
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one number")]
    PasswordMissingDigit,

    #[error("Name must be at least {min} characters long")]
    NameTooShort { min: usize },

    #[error("Name must be at most {max} characters long")]
    NameTooLong { max: usize },

    /// Name carries a record delimiter, quote or control character
    #[error("Name contains invalid characters")]
    NameInvalidCharacters,
}

impl ValidationError {
    /// Name of the input field the violation belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(fields) => fields.first().copied().unwrap_or("name"),
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::PasswordTooShort { .. }
            | ValidationError::PasswordMissingUppercase
            | ValidationError::PasswordMissingLowercase
            | ValidationError::PasswordMissingDigit => "password",
            ValidationError::NameTooShort { .. }
            | ValidationError::NameTooLong { .. }
            | ValidationError::NameInvalidCharacters => "name",
        }
    }
}
