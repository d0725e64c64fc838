//! CLI module for tweetdb
//!
//! - init: Create the data directory layout
//! - start: Replay the journal and serve stdin requests until EOF
//! - list: Replay the journal and print one listing

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, list, run, run_command, serve, start};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_requests, write_error, write_json};
