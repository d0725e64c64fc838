//! Journal error types
//!
//! | Code | Severity |
//! |---|---|
//! | TWEET_WAL_APPEND_FAILED | ERROR |
//! | TWEET_WAL_FSYNC_FAILED | FATAL |
//! | TWEET_WAL_CORRUPTION | FATAL |
//!
//! An append failure leaves the journal as it was. A failed fsync or any
//! corruption means the journal can no longer be trusted.

use std::fmt;
use std::io;

use thiserror::Error;

/// Severity levels shared by subsystem errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, process continues
    Error,
    /// Process must terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        })
    }
}

/// Where in the journal a corruption was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalPosition {
    /// Detected before any frame was read (open, metadata, seek)
    File,
    /// Byte offset of the frame being decoded
    Offset(u64),
    /// Sequence number carried by a decoded frame
    Sequence(u64),
}

impl fmt::Display for JournalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalPosition::File => Ok(()),
            JournalPosition::Offset(offset) => write!(f, " (byte_offset: {})", offset),
            JournalPosition::Sequence(seq) => write!(f, " (sequence_number: {})", seq),
        }
    }
}

#[derive(Debug, Error)]
pub enum WalError {
    /// Frame write failed; nothing was acknowledged
    #[error("[ERROR] TWEET_WAL_APPEND_FAILED: {context}")]
    Append {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("[FATAL] TWEET_WAL_FSYNC_FAILED: {context}")]
    Fsync {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("[FATAL] TWEET_WAL_CORRUPTION: {reason}{at}")]
    Corruption { reason: String, at: JournalPosition },
}

impl WalError {
    pub fn append_failed(context: impl Into<String>, source: io::Error) -> Self {
        WalError::Append {
            context: context.into(),
            source,
        }
    }

    pub fn fsync_failed(context: impl Into<String>, source: io::Error) -> Self {
        WalError::Fsync {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(reason: impl Into<String>) -> Self {
        WalError::Corruption {
            reason: reason.into(),
            at: JournalPosition::File,
        }
    }

    pub fn corruption_at_sequence(sequence: u64, reason: impl Into<String>) -> Self {
        WalError::Corruption {
            reason: reason.into(),
            at: JournalPosition::Sequence(sequence),
        }
    }

    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        WalError::Corruption {
            reason: reason.into(),
            at: JournalPosition::Offset(offset),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            WalError::Append { .. } => "TWEET_WAL_APPEND_FAILED",
            WalError::Fsync { .. } => "TWEET_WAL_FSYNC_FAILED",
            WalError::Corruption { .. } => "TWEET_WAL_CORRUPTION",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            WalError::Append { .. } => Severity::Error,
            WalError::Fsync { .. } | WalError::Corruption { .. } => Severity::Fatal,
        }
    }

    /// Human-readable cause without code or position
    pub fn message(&self) -> &str {
        match self {
            WalError::Append { context, .. } | WalError::Fsync { context, .. } => context.as_str(),
            WalError::Corruption { reason, .. } => reason.as_str(),
        }
    }

    pub fn position(&self) -> Option<JournalPosition> {
        match self {
            WalError::Corruption { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for journal operations
pub type WalResult<T> = Result<T, WalError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_error() -> io::Error {
        io::Error::new(io::ErrorKind::Other, "disk")
    }

    #[test]
    fn test_codes_and_severities() {
        let append = WalError::append_failed("write failed", disk_error());
        assert_eq!(append.code(), "TWEET_WAL_APPEND_FAILED");
        assert!(!append.is_fatal());
        assert!(std::error::Error::source(&append).is_some());

        let fsync = WalError::fsync_failed("fsync failed", disk_error());
        assert_eq!(fsync.code(), "TWEET_WAL_FSYNC_FAILED");
        assert!(fsync.is_fatal());

        let corrupt = WalError::corruption("bad frame");
        assert_eq!(corrupt.code(), "TWEET_WAL_CORRUPTION");
        assert!(corrupt.is_fatal());
        assert_eq!(corrupt.position(), Some(JournalPosition::File));
    }

    #[test]
    fn test_display_carries_position() {
        let err = WalError::corruption_at_sequence(42, "checksum mismatch");
        assert_eq!(
            err.to_string(),
            "[FATAL] TWEET_WAL_CORRUPTION: checksum mismatch (sequence_number: 42)"
        );
        assert_eq!(err.message(), "checksum mismatch");

        let err = WalError::corruption_at_offset(128, "truncated");
        assert_eq!(err.position(), Some(JournalPosition::Offset(128)));
        assert!(err.to_string().ends_with("(byte_offset: 128)"));
    }
}
