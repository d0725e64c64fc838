//! Journal replay
//!
//! Replays journal records sequentially from byte 0 into a record engine.
//!
//! - Must start at byte 0
//! - Every record is checksum-validated by the reader
//! - Every journaled call must be accepted again by the engine
//! - A CREATE must be assigned the id it was journaled with
//! - On ANY failure: FATAL error, abort immediately

use std::fmt::Display;

use crate::store::{MutationOutcome, RecordEngine};
use crate::wal::{RecordType, WalReader, WalRecord};

use super::errors::{RecoveryError, RecoveryResult};

/// Source of journal records
pub trait WalRead {
    /// Next record, None at end of journal, Err on corruption
    fn read_next(&mut self) -> RecoveryResult<Option<WalRecord>>;

    /// Current byte offset
    fn current_offset(&self) -> u64;

    /// Rewind to the first record
    fn reset(&mut self) -> RecoveryResult<()>;
}

impl WalRead for WalReader {
    fn read_next(&mut self) -> RecoveryResult<Option<WalRecord>> {
        let offset = WalReader::current_offset(self);
        WalReader::read_next(self).map_err(|e| RecoveryError::wal_corruption(offset, e.to_string()))
    }

    fn current_offset(&self) -> u64 {
        WalReader::current_offset(self)
    }

    fn reset(&mut self) -> RecoveryResult<()> {
        WalReader::reset(self).map_err(|e| RecoveryError::recovery_failed(e.to_string()))
    }
}

/// Statistics from journal replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub records_replayed: u64,
    pub creates: u64,
    pub updates: u64,
    pub deletes: u64,
    pub like_toggles: u64,
    pub retweet_toggles: u64,
    pub final_offset: u64,
    pub final_sequence: u64,
}

pub struct JournalReplayer;

impl JournalReplayer {
    /// Replay every journal record into `engine`.
    ///
    /// Replay is deterministic: the same journal replayed into two empty
    /// engines produces identical state.
    pub fn replay<W, E>(wal: &mut W, engine: &mut E) -> RecoveryResult<ReplayStats>
    where
        W: WalRead,
        E: RecordEngine,
        E::Error: Display,
    {
        wal.reset()?;

        let mut stats = ReplayStats::default();

        while let Some(record) = wal.read_next()? {
            let sequence = record.sequence_number;
            let outcome = engine
                .apply(record.to_mutation())
                .map_err(|e| RecoveryError::rejected(sequence, e.to_string()))?;

            if let MutationOutcome::Created(assigned) = outcome {
                if assigned.value() != record.payload.record_id {
                    return Err(RecoveryError::id_mismatch(
                        sequence,
                        record.payload.record_id,
                        assigned.value(),
                    ));
                }
            }

            stats.records_replayed += 1;
            stats.final_sequence = sequence;

            match record.record_type {
                RecordType::Create => stats.creates += 1,
                RecordType::Update => stats.updates += 1,
                RecordType::Delete => stats.deletes += 1,
                RecordType::ToggleLike => stats.like_toggles += 1,
                RecordType::ToggleRetweet => stats.retweet_toggles += 1,
            }
        }

        stats.final_offset = wal.current_offset();

        Ok(stats)
    }
}
