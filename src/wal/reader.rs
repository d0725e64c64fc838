//! Journal reader with strict corruption detection
//!
//! Zero tolerance:
//! - Any checksum failure, truncation, unknown type or sequence gap is
//!   corruption
//! - No skipping records, no repair attempts
//!
//! Replay reads records strictly in sequence order starting at byte 0.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::errors::{WalError, WalResult};
use super::record::{WalRecord, MIN_RECORD_SIZE};

/// Sequential journal reader.
pub struct WalReader {
    wal_path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
    /// Last successfully read sequence number
    last_sequence: u64,
}

impl WalReader {
    /// Opens a journal file for reading.
    pub fn open(wal_path: &Path) -> WalResult<Self> {
        let file = File::open(wal_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                WalError::corruption(format!("WAL file not found: {}", wal_path.display()))
            } else {
                WalError::corruption(format!(
                    "Failed to open WAL file: {}: {}",
                    wal_path.display(),
                    e
                ))
            }
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| WalError::corruption(format!("Failed to read WAL metadata: {}", e)))?
            .len();

        Ok(Self {
            wal_path: wal_path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
            last_sequence: 0,
        })
    }

    /// Opens `<data_dir>/wal/wal.log`.
    pub fn open_from_data_dir(data_dir: &Path) -> WalResult<Self> {
        Self::open(&data_dir.join("wal").join("wal.log"))
    }

    pub fn path(&self) -> &Path {
        &self.wal_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    pub fn last_sequence_number(&self) -> u64 {
        self.last_sequence
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a record was read and validated
    /// - `Ok(None)` at a clean end of file
    /// - `Err(WalError)` on any corruption or read error
    pub fn read_next(&mut self) -> WalResult<Option<WalRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        let min_size = MIN_RECORD_SIZE as u64;

        if remaining < min_size {
            return Err(WalError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated WAL: {} bytes remaining, minimum record size is {}",
                    remaining, min_size
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            WalError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < min_size {
            return Err(WalError::corruption_at_offset(
                self.current_offset,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if record_length > remaining {
            return Err(WalError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Record length {} exceeds remaining file size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            WalError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, bytes_consumed) = WalRecord::deserialize(&record_buf)
            .map_err(|e| WalError::corruption_at_offset(self.current_offset, e.to_string()))?;

        let expected = self.last_sequence + 1;
        if record.sequence_number != expected {
            return Err(WalError::corruption_at_sequence(
                record.sequence_number,
                format!(
                    "Non-sequential sequence number: expected {}, got {}",
                    expected, record.sequence_number
                ),
            ));
        }

        self.current_offset += bytes_consumed as u64;
        self.last_sequence = record.sequence_number;

        Ok(Some(record))
    }

    /// Reads every remaining record. Any corruption fails the whole read.
    pub fn read_all(&mut self) -> WalResult<Vec<WalRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Rewinds to the start of the journal.
    pub fn reset(&mut self) -> WalResult<()> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|e| WalError::corruption(format!("Failed to seek to start of WAL: {}", e)))?;
        self.current_offset = 0;
        self.last_sequence = 0;
        Ok(())
    }

    pub fn has_more(&self) -> bool {
        self.current_offset < self.file_size
    }
}
