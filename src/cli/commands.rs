//! CLI command implementations
//!
//! Each command wires the service from configuration, runs one operation
//! and writes one JSON object to stdout.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::args::{Command, RegisterArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use crate::notify::EmailNotifier;
use crate::registration::RegistrationService;
use crate::storage::FileAccountStore;
use crate::validation::RegistrationInput;

/// Build the registration service described by `config`
pub fn build_service(config: &Config) -> CliResult<RegistrationService> {
    let store = FileAccountStore::open(&config.data_dir, &config.store_file)
        .map_err(|e| CliError::config_error(e.to_string()))?;
    let notifier = EmailNotifier::from_config(config.notifications.clone());

    Ok(
        RegistrationService::new(config.hasher()?, Arc::new(store), Arc::new(notifier))
            .with_notify_timeout(Duration::from_millis(config.notifications.timeout_ms)),
    )
}

/// Run a parsed command against a configured service
pub fn run_command(command: Command, service: &RegistrationService) -> CliResult<()> {
    match command {
        Command::Register(args) => register(args, service),
        Command::Exists { email } => exists(&email, service),
        Command::Lookup { email } => lookup(&email, service),
        Command::Verify { email, password } => verify(&email, &password, service),
    }
}

/// Report a failed operation on stdout, then hand the error to the caller
fn fail(err: CliError) -> CliResult<()> {
    write_error(err.code_str(), err.message(), err.field())?;
    Err(err)
}

pub fn register(args: RegisterArgs, service: &RegistrationService) -> CliResult<()> {
    let input = if args.stdin {
        read_request::<RegistrationInput>()?
    } else {
        RegistrationInput::new(args.name, args.email, args.password)
    };

    match service.register(&input) {
        Ok(account) => write_response(json!({ "account": account })),
        Err(e) => fail(e.into()),
    }
}

pub fn exists(email: &str, service: &RegistrationService) -> CliResult<()> {
    match service.user_exists(email) {
        Ok(found) => write_response(json!({ "email": email, "exists": found })),
        Err(e) => fail(e.into()),
    }
}

pub fn lookup(email: &str, service: &RegistrationService) -> CliResult<()> {
    match service.find_account(email) {
        Ok(account) => write_response(json!({ "account": account })),
        Err(e) => fail(e.into()),
    }
}

pub fn verify(email: &str, password: &str, service: &RegistrationService) -> CliResult<()> {
    let account = match service.find_account(email) {
        Ok(account) => account,
        Err(e) => return fail(e.into()),
    };

    let hasher = service.hasher();
    let (valid, needs_rehash) = match account {
        Some(account) => (
            account.verify_password(hasher, password),
            hasher.needs_rehash(account.credential_hash()),
        ),
        None => (false, false),
    };

    write_response(json!({
        "email": email,
        "valid": valid,
        "needs_rehash": needs_rehash
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config::HashingConfig;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            data_dir: dir.path().join("data"),
            hashing: HashingConfig {
                memory_cost_kib: 64,
                time_cost: 1,
                parallelism: 1,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_build_service_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let service = build_service(&config).unwrap();

        assert!(config.data_dir.exists());
        assert!(!service.user_exists("john.doe@example.com").unwrap());
    }

    #[test]
    fn test_register_then_exists_via_commands() {
        let temp_dir = TempDir::new().unwrap();
        let service = build_service(&test_config(&temp_dir)).unwrap();

        let args = RegisterArgs {
            stdin: false,
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "SecurePass123".to_string(),
        };
        run_command(Command::Register(args), &service).unwrap();

        assert!(service.user_exists("john.doe@example.com").unwrap());
        run_command(
            Command::Verify {
                email: "john.doe@example.com".to_string(),
                password: "SecurePass123".to_string(),
            },
            &service,
        )
        .unwrap();
    }

    #[test]
    fn test_register_failure_returns_registration_code() {
        let temp_dir = TempDir::new().unwrap();
        let service = build_service(&test_config(&temp_dir)).unwrap();

        let args = RegisterArgs {
            stdin: false,
            name: "Jane".to_string(),
            email: "invalid-email".to_string(),
            password: "weak".to_string(),
        };
        let err = run_command(Command::Register(args), &service).unwrap_err();

        assert_eq!(err.code_str(), "REG_VALIDATION_FAILED");
        assert_eq!(err.message(), "Invalid email format: invalid-email");
        assert_eq!(err.field(), Some("email"));
    }
}
