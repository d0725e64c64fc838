//! CLI command implementations
//!
//! Every command that touches the store boots the same way: load config,
//! replay the journal, and only then serve.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;

use crate::api::{handle_with_actor, ApiHandler, ListRequest, Request, Response};
use crate::host::{JournaledStore, StoreActor};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::List { config, upper_bound } => list(&config, upper_bound),
    }
}

/// Initialize a new data directory
///
/// Creates `<data_dir>/wal`. Writes no journal records and no clean
/// shutdown marker.
pub fn init(config_path: &Path) -> CliResult<()> {
    init_to(config_path, &mut io::stdout())
}

fn init_to<W: Write>(config_path: &Path, output: &mut W) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data_dir = config.data_path();

    if is_initialized(data_dir) {
        return Err(CliError::AlreadyInitialized(data_dir.to_path_buf()));
    }

    let wal_dir = data_dir.join("wal");
    fs::create_dir_all(&wal_dir).map_err(|e| {
        CliError::Config(format!("Failed to create directory {:?}: {}", wal_dir, e))
    })?;

    write_json(output, &json!({"status": "ok", "data": {"initialized": true}}).to_string())
}

/// Boot and serve request lines from stdin until EOF
pub fn start(config_path: &Path) -> CliResult<()> {
    let stdin = io::stdin();
    serve(config_path, stdin.lock(), &mut io::stdout())
}

/// Boot and serve request lines from `input`, writing one response line
/// per request to `output`.
///
/// Requests go through a store actor in arrival order. On EOF the actor
/// drains, the journal is synced and the clean shutdown marker written.
pub fn serve<R: BufRead, W: Write>(config_path: &Path, input: R, output: &mut W) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = boot(&config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Host(format!("failed to create tokio runtime: {}", e)))?;

    let (handle, task) = {
        let _guard = rt.enter();
        StoreActor::spawn(store, config.queue_capacity)
    };
    log_event_with_fields(Event::Serving, &[("data_dir", config.data_dir.as_str())]);

    let mut served = 0u64;
    let mut io_failure = None;
    for line in read_requests(input) {
        match line {
            Ok(line) => {
                let response = rt.block_on(handle_with_actor(&handle, &line));
                write_json(output, &response.to_json())?;
                served += 1;
            }
            Err(e) => {
                // Reading stdin failed; stop serving but still shut down cleanly
                write_error(output, &e)?;
                io_failure = Some(e);
                break;
            }
        }
    }

    log_event_with_fields(Event::ShutdownStart, &[("requests", served.to_string().as_str())]);
    drop(handle);
    let store = rt
        .block_on(task)
        .map_err(|e| CliError::Host(format!("store actor panicked: {}", e)))?;
    shutdown(store)?;

    match io_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Boot and print one listing
pub fn list(config_path: &Path, upper_bound: i64) -> CliResult<()> {
    list_to(config_path, upper_bound, &mut io::stdout())
}

fn list_to<W: Write>(config_path: &Path, upper_bound: i64, output: &mut W) -> CliResult<()> {
    let config = load_config(config_path)?;
    let mut handler = ApiHandler::new(boot(&config)?);

    let response = match handler.execute(Request::List(ListRequest { upper_bound })) {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&e),
    };
    write_json(output, &response.to_json())?;

    shutdown(handler.into_engine())
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", config.data_dir.as_str()),
            ("deleted_toggle_policy", config.deleted_toggle_policy.as_str()),
        ],
    );
    Ok(config)
}

fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join("wal").is_dir()
}

/// Replay the journal into a fresh store
///
/// FATAL: any replay failure halts startup; no partial store is served.
fn boot(config: &Config) -> CliResult<JournaledStore> {
    log_event(Event::BootStart);

    let data_dir = config.data_path();
    if !is_initialized(data_dir) {
        return Err(CliError::NotInitialized(data_dir.to_path_buf()));
    }

    let store = JournaledStore::open(data_dir, config.store_config()).map_err(CliError::Boot)?;

    log_event_with_fields(
        Event::BootComplete,
        &[
            ("records", store.store().len().to_string().as_str()),
            ("replayed", store.replay_stats().records_replayed.to_string().as_str()),
        ],
    );
    Ok(store)
}

fn shutdown(store: JournaledStore) -> CliResult<()> {
    let metrics = store.metrics().to_json();
    store.shutdown().map_err(CliError::Shutdown)?;
    log_event_with_fields(Event::ShutdownComplete, &[("metrics", metrics.as_str())]);
    Ok(())
}
