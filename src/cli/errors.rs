//! CLI failures
//!
//! Every variant ends the process with a non-zero exit. Journal and
//! recovery failures keep their `HostError` as the source so the printed
//! chain still names the underlying `TWEET_WAL_*` / `TWEET_RECOVERY_*` code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::host::HostError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Unreadable, malformed or out-of-range configuration
    #[error("{0}")]
    Config(String),

    /// stdin/stdout failure
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("data directory {} is already initialized", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("data directory {} is not initialized; run 'tweetdb init' first", .0.display())]
    NotInitialized(PathBuf),

    /// Journal replay or store open failed; no partial store is served
    #[error("boot failed: {0}")]
    Boot(#[source] HostError),

    /// The tokio runtime or the store actor could not run
    #[error("store host failed: {0}")]
    Host(String),

    #[error("shutdown failed: {0}")]
    Shutdown(#[source] HostError),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "TWEET_CLI_CONFIG_ERROR",
            CliError::Io(_) => "TWEET_CLI_IO_ERROR",
            CliError::AlreadyInitialized(_) => "TWEET_CLI_ALREADY_INITIALIZED",
            CliError::NotInitialized(_) => "TWEET_CLI_NOT_INITIALIZED",
            CliError::Boot(_) => "TWEET_CLI_BOOT_FAILED",
            CliError::Host(_) => "TWEET_CLI_HOST_FAILED",
            CliError::Shutdown(_) => "TWEET_CLI_SHUTDOWN_FAILED",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
