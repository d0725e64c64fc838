//! Configuration file
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/tweetdb",
//!   "wal_sync_mode": "fsync",
//!   "deleted_toggle_policy": "allow",
//!   "log_level": "info",
//!   "queue_capacity": 1024
//! }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::DEFAULT_QUEUE_CAPACITY;
use crate::observability::Severity;
use crate::store::{DeletedTogglePolicy, StoreConfig};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Journal sync mode; "fsync" is the only accepted value
    #[serde(default = "default_wal_sync_mode")]
    pub wal_sync_mode: String,

    #[serde(default)]
    pub deleted_toggle_policy: DeletedTogglePolicy,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request queue depth in front of the store actor
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_wal_sync_mode() -> String {
    "fsync".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::Config("data_dir must not be empty".to_string()));
        }

        if self.wal_sync_mode != "fsync" {
            return Err(CliError::Config(format!(
                "Invalid wal_sync_mode: '{}'. Only 'fsync' is allowed.",
                self.wal_sync_mode
            )));
        }

        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::Config(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        if self.queue_capacity == 0 {
            return Err(CliError::Config("queue_capacity must be > 0".to_string()));
        }

        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::with_policy(self.deleted_toggle_policy)
    }

    /// Validated log level; INFO if unparsable
    pub fn log_severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_json(r#"{"data_dir": "/tmp/tweetdb"}"#).unwrap();
        assert_eq!(config.wal_sync_mode, "fsync");
        assert_eq!(config.deleted_toggle_policy, DeletedTogglePolicy::Allow);
        assert_eq!(config.log_severity(), Severity::Info);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.store_config(), StoreConfig::default());
    }

    #[test]
    fn test_reject_policy() {
        let config =
            Config::from_json(r#"{"data_dir": "d", "deleted_toggle_policy": "reject"}"#).unwrap();
        assert_eq!(
            config.store_config().deleted_toggle_policy,
            DeletedTogglePolicy::Reject
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for json in [
            r#"{}"#,
            r#"{"data_dir": ""}"#,
            r#"{"data_dir": "d", "wal_sync_mode": "none"}"#,
            r#"{"data_dir": "d", "deleted_toggle_policy": "maybe"}"#,
            r#"{"data_dir": "d", "log_level": "verbose"}"#,
            r#"{"data_dir": "d", "queue_capacity": 0}"#,
        ] {
            let err = Config::from_json(json).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "{}", json);
        }
    }
}
