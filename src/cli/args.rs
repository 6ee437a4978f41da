//! CLI argument definitions using clap
//!
//! Commands:
//! - registrar register --name <name> --email <email> --password <password>
//! - registrar register --stdin
//! - registrar exists --email <email>
//! - registrar lookup --email <email>
//! - registrar verify --email <email> --password <password>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// registrar - account registration over an append-only record file
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to JSON configuration file; built-in defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new account
    Register(RegisterArgs),

    /// Report whether an account with this email exists
    Exists {
        #[arg(long)]
        email: String,
    },

    /// Print the stored account for this email
    Lookup {
        #[arg(long)]
        email: String,
    },

    /// Check a password against the stored credential
    Verify {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Read `{"name", "email", "password"}` from stdin instead of flags
    #[arg(long, conflicts_with_all = ["name", "email", "password"])]
    pub stdin: bool,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub password: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register_flags() {
        let cli = Cli::try_parse_from([
            "registrar",
            "register",
            "--name",
            "John Doe",
            "--email",
            "john.doe@example.com",
            "--password",
            "SecurePass123",
        ])
        .unwrap();

        match cli.command {
            Command::Register(args) => {
                assert!(!args.stdin);
                assert_eq!(args.name, "John Doe");
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "registrar",
            "exists",
            "--email",
            "a@example.com",
            "--config",
            "/etc/registrar.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/registrar.json")));
    }

    #[test]
    fn test_stdin_conflicts_with_flags() {
        let result = Cli::try_parse_from(["registrar", "register", "--stdin", "--name", "John"]);
        assert!(result.is_err());
    }
}
