//! Recovery Manager startup sequence
//!
//! # Startup Sequence (strict order)
//!
//! 1. Note whether the clean shutdown marker is present
//! 2. Open the journal reader (a missing journal means an empty store)
//! 3. Replay the journal from offset 0 into a fresh store
//! 4. Switch the store to the configured toggle policy
//! 5. Clear the clean shutdown marker
//! 6. Hand the rebuilt store to the serving layer
//!
//! Every journaled call was accepted when it was written, so replay runs
//! under the permissive toggle policy. The configured policy only governs
//! calls made after startup. A failed replay leaves the marker in place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::{DeletedTogglePolicy, RecordStore, StoreConfig};
use crate::wal::WalReader;

use super::errors::{RecoveryError, RecoveryResult};
use super::replay::{JournalReplayer, ReplayStats};

/// Clean shutdown marker filename
const CLEAN_SHUTDOWN_MARKER: &str = "clean_shutdown";

/// Result of a successful startup
#[derive(Debug)]
pub struct RecoveryState {
    pub store: RecordStore,
    pub replay_stats: ReplayStats,
    /// Whether the previous process exited through a clean shutdown
    pub was_clean_shutdown: bool,
}

/// Rebuilds a record store from the journal in a data directory
pub struct RecoveryManager {
    data_dir: PathBuf,
    config: StoreConfig,
}

impl RecoveryManager {
    pub fn new(data_dir: impl AsRef<Path>, config: StoreConfig) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            config,
        }
    }

    fn marker_path(&self) -> PathBuf {
        self.data_dir.join(CLEAN_SHUTDOWN_MARKER)
    }

    fn wal_path(&self) -> PathBuf {
        self.data_dir.join("wal").join("wal.log")
    }

    pub fn was_clean_shutdown(&self) -> bool {
        self.marker_path().exists()
    }

    fn remove_shutdown_marker(&self) -> RecoveryResult<()> {
        let path = self.marker_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                RecoveryError::recovery_failed(format!("Failed to remove shutdown marker: {}", e))
            })?;
        }
        Ok(())
    }

    /// Write clean shutdown marker (called on graceful shutdown)
    pub fn mark_clean_shutdown(&self) -> RecoveryResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            RecoveryError::recovery_failed(format!("Failed to create data directory: {}", e))
        })?;
        fs::write(self.marker_path(), b"").map_err(|e| {
            RecoveryError::recovery_failed(format!("Failed to write shutdown marker: {}", e))
        })
    }

    /// Execute the full recovery sequence.
    ///
    /// Returns the rebuilt store, or a FATAL error on any failure.
    pub fn recover(&self) -> RecoveryResult<RecoveryState> {
        log_event(Event::RecoveryStart);

        let was_clean_shutdown = self.was_clean_shutdown();

        let mut store = RecordStore::new(StoreConfig::with_policy(DeletedTogglePolicy::Allow));
        let wal_path = self.wal_path();

        let replay_stats = if wal_path.exists() {
            let mut reader = WalReader::open(&wal_path).map_err(|e| {
                RecoveryError::recovery_failed(format!("Failed to open journal: {}", e))
            })?;

            log_event(Event::RecoveryReplayBegin);
            match JournalReplayer::replay(&mut reader, &mut store) {
                Ok(stats) => stats,
                Err(e) => {
                    log_event_with_fields(
                        Event::RecoveryFailed,
                        &[("code", e.code().code()), ("message", e.message())],
                    );
                    return Err(e);
                }
            }
        } else {
            ReplayStats::default()
        };

        store.set_config(self.config);
        self.remove_shutdown_marker()?;

        log_event_with_fields(
            Event::RecoveryComplete,
            &[
                ("clean_shutdown", if was_clean_shutdown { "true" } else { "false" }),
                ("records", store.len().to_string().as_str()),
                ("replayed", replay_stats.records_replayed.to_string().as_str()),
            ],
        );

        Ok(RecoveryState {
            store,
            replay_stats,
            was_clean_shutdown,
        })
    }
}
