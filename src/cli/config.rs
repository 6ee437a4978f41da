//! Configuration file structure
//!
//! Every field has a default; a missing config file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use lettre::Address;
use serde::Deserialize;

use super::errors::{CliError, CliResult};
use crate::credentials::{
    CredentialHasher, DEFAULT_MEMORY_COST_KIB, DEFAULT_PARALLELISM, DEFAULT_TIME_COST,
};
use crate::notify::NotificationConfig;
use crate::storage::DEFAULT_STORE_FILE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the record file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Record file name inside `data_dir`
    #[serde(default = "default_store_file")]
    pub store_file: String,

    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HashingConfig {
    #[serde(default = "default_memory_cost")]
    pub memory_cost_kib: u32,

    #[serde(default = "default_time_cost")]
    pub time_cost: u32,

    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}
fn default_memory_cost() -> u32 {
    DEFAULT_MEMORY_COST_KIB
}
fn default_time_cost() -> u32 {
    DEFAULT_TIME_COST
}
fn default_parallelism() -> u32 {
    DEFAULT_PARALLELISM
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: default_memory_cost(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: default_store_file(),
            hashing: HashingConfig::default(),
            notifications: NotificationConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.store_file.is_empty() || self.store_file.contains(['/', '\\']) {
            return Err(CliError::config_error(format!(
                "Invalid store_file: '{}'. Must be a plain file name.",
                self.store_file
            )));
        }

        self.hasher()?;

        if self.notifications.timeout_ms == 0 {
            return Err(CliError::config_error("notifications.timeout_ms must be > 0"));
        }

        if self.notifications.admin_email.parse::<Address>().is_err() {
            return Err(CliError::config_error(format!(
                "Invalid notifications.admin_email: '{}'",
                self.notifications.admin_email
            )));
        }

        Ok(())
    }

    /// Hasher built from the configured costs
    pub fn hasher(&self) -> CliResult<CredentialHasher> {
        CredentialHasher::with_params(
            self.hashing.memory_cost_kib,
            self.hashing.time_cost,
            self.hashing.parallelism,
        )
        .map_err(|e| CliError::config_error(format!("Hashing config error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.store_file, "users.txt");
        assert_eq!(config.hashing.memory_cost_kib, 65536);
        assert_eq!(config.hashing.time_cost, 4);
        assert_eq!(config.hashing.parallelism, 3);
        assert_eq!(config.notifications.admin_email, "admin@ourplatform.com");
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{"data_dir": "/var/lib/registrar", "hashing": {"time_cost": 6}, "log": {"format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/registrar"));
        assert_eq!(config.hashing.time_cost, 6);
        assert_eq!(config.hashing.memory_cost_kib, 65536);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_path_in_store_file() {
        assert!(Config::from_json(r#"{"store_file": "../users.txt"}"#).is_err());
        assert!(Config::from_json(r#"{"store_file": ""}"#).is_err());
    }

    #[test]
    fn test_rejects_bad_hashing_params() {
        let err = Config::from_json(r#"{"hashing": {"time_cost": 0}}"#).unwrap_err();
        assert!(err.message().contains("Hashing config error"));
    }

    #[test]
    fn test_rejects_zero_timeout_and_bad_admin() {
        assert!(Config::from_json(r#"{"notifications": {"timeout_ms": 0}}"#).is_err());
        assert!(Config::from_json(r#"{"notifications": {"admin_email": "nope"}}"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Config::from_json(r#"{"log": {"format": "xml"}}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/registrar.json")).unwrap_err();
        assert_eq!(err.code_str(), "REG_CLI_CONFIG_ERROR");
    }
}
