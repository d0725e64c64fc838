//! Journal writer with fsync enforcement
//!
//! - Every append is followed by fsync
//! - No batching, no async durability
//! - A record is acknowledged only after fsync returns

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::record::RecordId;
use crate::store::Mutation;

use super::errors::{WalError, WalResult};
use super::reader::WalReader;
use super::record::{RecordType, WalPayload, WalRecord};

/// Append-only journal writer.
///
/// Single file at `<data_dir>/wal/wal.log`, opened for append. The
/// journal is never truncated: it is the full call history.
pub struct WalWriter {
    wal_path: PathBuf,
    file: File,
    /// Next sequence number to assign (starts at 1, never reused)
    next_sequence: u64,
    /// Bytes appended by this writer since open
    bytes_written: u64,
}

impl WalWriter {
    /// Opens or creates the journal under `data_dir`.
    ///
    /// Creates `<data_dir>/wal/wal.log` and parent directories if missing.
    /// The existing journal is scanned to continue its sequence.
    ///
    /// # Errors
    ///
    /// - `TWEET_WAL_APPEND_FAILED` if the file cannot be created or opened
    /// - `TWEET_WAL_CORRUPTION` if the existing journal is corrupt
    pub fn open(data_dir: &Path) -> WalResult<Self> {
        let wal_dir = data_dir.join("wal");
        let wal_path = wal_dir.join("wal.log");

        if !wal_dir.exists() {
            fs::create_dir_all(&wal_dir).map_err(|e| {
                WalError::append_failed(
                    format!("Failed to create WAL directory: {}", wal_dir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&wal_path)
            .map_err(|e| {
                WalError::append_failed(
                    format!("Failed to open WAL file: {}", wal_path.display()),
                    e,
                )
            })?;

        let next_sequence = Self::determine_next_sequence(&wal_path)?;

        Ok(Self {
            wal_path,
            file,
            next_sequence,
            bytes_written: 0,
        })
    }

    /// Returns 1 for an empty or missing journal.
    fn determine_next_sequence(wal_path: &Path) -> WalResult<u64> {
        let metadata = match fs::metadata(wal_path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(1),
            Err(e) => return Err(WalError::append_failed("Failed to read WAL metadata", e)),
        };

        if metadata.len() == 0 {
            return Ok(1);
        }

        let mut reader = WalReader::open(wal_path)?;
        while reader.read_next()?.is_some() {}

        Ok(reader.last_sequence_number() + 1)
    }

    pub fn path(&self) -> &Path {
        &self.wal_path
    }

    /// Returns the next sequence number that will be assigned.
    pub fn next_sequence_number(&self) -> u64 {
        self.next_sequence
    }

    /// Returns the last assigned sequence number, or 0 if none.
    pub fn last_sequence_number(&self) -> u64 {
        self.next_sequence - 1
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Appends a record with fsync enforcement.
    ///
    /// Returns the sequence number assigned to the record.
    ///
    /// # Errors
    ///
    /// - `TWEET_WAL_APPEND_FAILED` if the write fails
    /// - `TWEET_WAL_FSYNC_FAILED` if fsync fails (FATAL)
    pub fn append(&mut self, record_type: RecordType, payload: WalPayload) -> WalResult<u64> {
        let sequence_number = self.next_sequence;
        let record = WalRecord::new(record_type, sequence_number, payload);
        self.write_record(&record)
    }

    /// Appends an accepted mutation. `assigned` is the id a CREATE receives.
    pub fn append_mutation(&mut self, mutation: &Mutation, assigned: RecordId) -> WalResult<u64> {
        let record = WalRecord::from_mutation(self.next_sequence, mutation, assigned);
        self.write_record(&record)
    }

    fn write_record(&mut self, record: &WalRecord) -> WalResult<u64> {
        let sequence_number = record.sequence_number;
        let serialized = record.serialize();

        self.file.write_all(&serialized).map_err(|e| {
            WalError::append_failed(
                format!("Failed to write WAL record at sequence {}", sequence_number),
                e,
            )
        })?;

        self.file.sync_all().map_err(|e| {
            WalError::fsync_failed(
                format!("fsync failed after WAL append at sequence {}", sequence_number),
                e,
            )
        })?;

        // Only advance after successful fsync
        self.next_sequence += 1;
        self.bytes_written += serialized.len() as u64;

        Ok(sequence_number)
    }

    /// Explicitly fsync the journal file.
    pub fn fsync(&self) -> WalResult<()> {
        self.file
            .sync_all()
            .map_err(|e| WalError::fsync_failed("Explicit WAL fsync failed", e))
    }
}
