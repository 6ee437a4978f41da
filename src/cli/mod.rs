//! CLI module for registrar
//!
//! Thin harness around [`crate::registration::RegistrationService`]:
//! - register: create an account
//! - exists: uniqueness query
//! - lookup: fetch a stored account
//! - verify: check a password against the stored credential

mod args;
mod commands;
pub mod config;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command, RegisterArgs};
pub use commands::{build_service, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments, load configuration, install logging and run the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;

    logging::init(&config.log)?;

    let service = build_service(&config)?;
    run_command(cli.command, &service)
}
