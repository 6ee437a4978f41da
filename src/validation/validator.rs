//! Registration rule engine

use std::fmt;

use lettre::Address;
use serde::Deserialize;

use super::errors::{ValidationError, ValidationResult};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;

/// Characters a display name may never carry. Covers the record file's
/// field delimiter and the legacy CSV separator and quote.
const FORBIDDEN_NAME_CHARS: &[char] = &['|', ',', '"'];

/// Raw registration input, before any validation or hashing.
///
/// Absent keys deserialize to empty strings so the presence rule can
/// report them.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stateless validator for registration input
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule in order, stopping at the first violation.
    pub fn validate(&self, input: &RegistrationInput) -> ValidationResult<()> {
        validate_required(input)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        validate_name(&input.name)
    }
}

fn validate_required(input: &RegistrationInput) -> ValidationResult<()> {
    let missing: Vec<&'static str> = [
        ("name", &input.name),
        ("email", &input.email),
        ("password", &input.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

fn validate_email(email: &str) -> ValidationResult<()> {
    email
        .parse::<Address>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidEmail(email.to_string()))
}

fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }

    Ok(())
}

fn validate_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();

    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort {
            min: MIN_NAME_LENGTH,
        });
    }

    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() || FORBIDDEN_NAME_CHARS.contains(&c))
    {
        return Err(ValidationError::NameInvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, password: &str) -> RegistrationInput {
        RegistrationInput::new(name, email, password)
    }

    fn check(name: &str, email: &str, password: &str) -> ValidationResult<()> {
        Validator::new().validate(&input(name, email, password))
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(check("John Doe", "john.doe@example.com", "SecurePass123").is_ok());
    }

    #[test]
    fn test_all_fields_missing_listed_in_order() {
        let err = check("", "", "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["name", "email", "password"])
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: name, email, password"
        );
    }

    #[test]
    fn test_single_missing_field() {
        let err = check("John Doe", "john.doe@example.com", "").unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["password"]));
    }

    #[test]
    fn test_missing_keys_deserialize_as_empty() {
        let parsed: RegistrationInput = serde_json::from_str(r#"{"name": "John"}"#).unwrap();
        let err = Validator::new().validate(&parsed).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["email", "password"]));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let err = check("John Doe", "invalid-email", "SecurePass123").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("invalid-email".to_string()));
    }

    #[test]
    fn test_email_checked_before_password() {
        let err = check("Jane", "invalid-email", "weak").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail(_)));
    }

    #[test]
    fn test_email_with_spaces_rejected() {
        assert!(matches!(
            check("John Doe", "john doe@example.com", "SecurePass123"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_password_rules_in_order() {
        let email = "john.doe@example.com";
        assert_eq!(
            check("John Doe", email, "Ab1").unwrap_err(),
            ValidationError::PasswordTooShort { min: 8 }
        );
        assert_eq!(
            check("John Doe", email, "abcdefgh1").unwrap_err(),
            ValidationError::PasswordMissingUppercase
        );
        assert_eq!(
            check("John Doe", email, "ABCDEFGH1").unwrap_err(),
            ValidationError::PasswordMissingLowercase
        );
        assert_eq!(
            check("John Doe", email, "Abcdefghi").unwrap_err(),
            ValidationError::PasswordMissingDigit
        );
    }

    #[test]
    fn test_password_classes_are_ascii_only() {
        let email = "john.doe@example.com";
        assert_eq!(
            check("John Doe", email, "\u{c9}bcdefg1").unwrap_err(),
            ValidationError::PasswordMissingUppercase
        );
        assert_eq!(
            check("John Doe", email, "ABCDEF\u{e9}1").unwrap_err(),
            ValidationError::PasswordMissingLowercase
        );
        assert!(check("John Doe", email, "\u{c9}Abcdefg1").is_ok());
    }

    #[test]
    fn test_short_password_reported_before_missing_classes() {
        assert_eq!(
            check("John Doe", "john.doe@example.com", "weak").unwrap_err(),
            ValidationError::PasswordTooShort { min: 8 }
        );
    }

    #[test]
    fn test_name_length_uses_trimmed_value() {
        let email = "john.doe@example.com";
        assert_eq!(
            check("  J  ", email, "SecurePass123").unwrap_err(),
            ValidationError::NameTooShort { min: 2 }
        );
        assert!(check("  Jo  ", email, "SecurePass123").is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        let email = "john.doe@example.com";
        assert!(check(&"a".repeat(100), email, "SecurePass123").is_ok());
        assert_eq!(
            check(&"a".repeat(101), email, "SecurePass123").unwrap_err(),
            ValidationError::NameTooLong { max: 100 }
        );
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        assert!(check(&"é".repeat(100), "john.doe@example.com", "SecurePass123").is_ok());
    }

    #[test]
    fn test_name_with_delimiter_characters_rejected() {
        let email = "john.doe@example.com";
        for name in ["John,Doe", "John|Doe", "John \"JD\" Doe", "John\nDoe", "John\tDoe"] {
            assert_eq!(
                check(name, email, "SecurePass123").unwrap_err(),
                ValidationError::NameInvalidCharacters,
                "name {:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", input("John", "j@example.com", "SecurePass123"));
        assert!(!debug.contains("SecurePass123"));
    }
}
