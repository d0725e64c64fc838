//! CLI argument definitions using clap
//!
//! Commands:
//! - tweetdb init --config <path>
//! - tweetdb start --config <path>
//! - tweetdb list --config <path> [--upper-bound <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tweetdb - A strict, deterministic, author-owned record store for short posts
#[derive(Parser, Debug)]
#[command(name = "tweetdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Initialize a new tweetdb data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./tweetdb.json")]
        config: PathBuf,
    },

    /// Replay the journal, then serve JSON requests from stdin until EOF
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./tweetdb.json")]
        config: PathBuf,
    },

    /// Replay the journal and print one listing
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./tweetdb.json")]
        config: PathBuf,

        /// Highest record id to include; negative lists everything
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        upper_bound: i64,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
