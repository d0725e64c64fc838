//! Call journal (write-ahead log) for tweetdb
//!
//! The journal is the store's only persisted state: every accepted
//! mutating call, in the order it was applied. Replaying it from byte 0
//! rebuilds the store exactly.
//!
//! # Rules
//!
//! - Validate first, journal second, apply third
//! - fsync before acknowledgment
//! - Checksums on every record
//! - Halt on corruption

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{JournalPosition, Severity, WalError, WalResult};
pub use reader::WalReader;
pub use record::{RecordType, WalPayload, WalRecord, MIN_RECORD_SIZE};
pub use writer::WalWriter;
