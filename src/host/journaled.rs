//! Journaled store: the durable serving engine
//!
//! Each mutating call is validated against the in-memory store, appended
//! to the journal (fsync), and only then applied. A call that fails
//! validation is never journaled; a call whose append fails is never
//! applied. Opening the store replays the journal first.

use std::path::Path;
use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::record::RecordView;
use crate::recovery::{RecoveryManager, ReplayStats};
use crate::store::{Mutation, MutationOutcome, RecordEngine, RecordStore, StoreConfig, ToggleKind};
use crate::wal::WalWriter;

use super::errors::{HostError, HostResult};

pub struct JournaledStore {
    store: RecordStore,
    writer: WalWriter,
    metrics: Arc<MetricsRegistry>,
    replay_stats: ReplayStats,
    recovery: RecoveryManager,
    halted: bool,
}

impl JournaledStore {
    /// Replay `<data_dir>/wal/wal.log` into a fresh store and open the
    /// journal for appending.
    pub fn open(data_dir: &Path, config: StoreConfig) -> HostResult<Self> {
        let recovery = RecoveryManager::new(data_dir, config);
        let state = recovery.recover()?;
        let writer = WalWriter::open(data_dir)?;

        Ok(Self {
            store: state.store,
            writer,
            metrics: Arc::new(MetricsRegistry::new()),
            replay_stats: state.replay_stats,
            recovery,
            halted: false,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    pub fn replay_stats(&self) -> &ReplayStats {
        &self.replay_stats
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Sync the journal and leave the clean shutdown marker for the next open
    pub fn shutdown(self) -> HostResult<()> {
        self.writer.fsync()?;
        self.recovery.mark_clean_shutdown()?;
        Ok(())
    }

    fn reject(&self, mutation: &Mutation, err: &HostError) {
        self.metrics.increment_calls_rejected();
        log_event_with_fields(
            Event::CallRejected,
            &[
                ("caller", mutation.caller().as_str()),
                ("code", err.code()),
                ("op", mutation.op_name()),
            ],
        );
    }

    fn record_accepted(&self, mutation: &Mutation, outcome: &MutationOutcome, sequence: u64) {
        let (event, detail) = match outcome {
            MutationOutcome::Created(_) => {
                self.metrics.increment_records_created();
                (Event::RecordCreated, None)
            }
            MutationOutcome::Updated => {
                self.metrics.increment_records_updated();
                (Event::RecordUpdated, None)
            }
            MutationOutcome::Deleted => {
                self.metrics.increment_records_deleted();
                (Event::RecordDeleted, None)
            }
            MutationOutcome::Toggled(toggle) => {
                let event = match mutation {
                    Mutation::Toggle { kind: ToggleKind::Retweet, .. } => {
                        self.metrics.increment_retweet_toggles();
                        Event::RetweetToggled
                    }
                    _ => {
                        self.metrics.increment_like_toggles();
                        Event::LikeToggled
                    }
                };
                (event, Some(toggle.as_str()))
            }
        };

        let record_id = match outcome {
            MutationOutcome::Created(id) => id.to_string(),
            _ => mutation.target().map(|id| id.to_string()).unwrap_or_default(),
        };
        let sequence = sequence.to_string();
        let mut fields = vec![
            ("caller", mutation.caller().as_str()),
            ("record_id", record_id.as_str()),
            ("sequence", sequence.as_str()),
        ];
        if let Some(detail) = detail {
            fields.push(("outcome", detail));
        }
        log_event_with_fields(event, &fields);
    }
}

impl RecordEngine for JournaledStore {
    type Error = HostError;

    fn apply(&mut self, mutation: Mutation) -> HostResult<MutationOutcome> {
        if self.halted {
            return Err(HostError::Halted);
        }

        if let Err(e) = self.store.validate(&mutation) {
            let err = HostError::from(e);
            self.reject(&mutation, &err);
            return Err(err);
        }

        let before = self.writer.bytes_written();
        let sequence = match self.writer.append_mutation(&mutation, self.store.next_id()) {
            Ok(sequence) => sequence,
            Err(e) => {
                // A partial append may be on disk; stop accepting calls
                self.halted = true;
                log_event_with_fields(
                    Event::WalCorruption,
                    &[("code", e.code()), ("message", e.message())],
                );
                return Err(HostError::Journal(e));
            }
        };
        self.metrics
            .record_wal_append(self.writer.bytes_written() - before);
        log_event_with_fields(
            Event::WalAppend,
            &[("op", mutation.op_name()), ("sequence", sequence.to_string().as_str())],
        );

        let outcome = self.store.apply(mutation.clone())?;
        self.record_accepted(&mutation, &outcome, sequence);
        Ok(outcome)
    }

    fn list(&self, upper_bound: i64) -> Vec<RecordView> {
        let views = self.store.list_records(upper_bound);
        self.metrics.increment_lists_served();
        log_event_with_fields(
            Event::RecordsListed,
            &[
                ("returned", views.len().to_string().as_str()),
                ("upper_bound", upper_bound.to_string().as_str()),
            ],
        );
        views
    }
}
