//! Recovery error types
//!
//! Error codes (all FATAL):
//! - TWEET_WAL_CORRUPTION
//! - TWEET_RECOVERY_REJECTED
//! - TWEET_RECOVERY_ID_MISMATCH
//! - TWEET_RECOVERY_FAILED

use std::fmt;

use crate::wal::Severity;

/// Recovery error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryErrorCode {
    /// Journal data is corrupt
    TweetWalCorruption,
    /// The store rejected a journaled call during replay
    TweetRecoveryRejected,
    /// A journaled creation replayed to a different id
    TweetRecoveryIdMismatch,
    /// Any other recovery failure
    TweetRecoveryFailed,
}

impl RecoveryErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            RecoveryErrorCode::TweetWalCorruption => "TWEET_WAL_CORRUPTION",
            RecoveryErrorCode::TweetRecoveryRejected => "TWEET_RECOVERY_REJECTED",
            RecoveryErrorCode::TweetRecoveryIdMismatch => "TWEET_RECOVERY_ID_MISMATCH",
            RecoveryErrorCode::TweetRecoveryFailed => "TWEET_RECOVERY_FAILED",
        }
    }

    /// All recovery errors are FATAL
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for RecoveryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Recovery error with position context
#[derive(Debug)]
pub struct RecoveryError {
    code: RecoveryErrorCode,
    message: String,
    offset: Option<u64>,
    sequence: Option<u64>,
}

impl RecoveryError {
    pub fn wal_corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: RecoveryErrorCode::TweetWalCorruption,
            message: format!("WAL corruption at offset {}: {}", offset, reason.into()),
            offset: Some(offset),
            sequence: None,
        }
    }

    /// A journaled call the store refused to apply
    pub fn rejected(sequence: u64, reason: impl Into<String>) -> Self {
        Self {
            code: RecoveryErrorCode::TweetRecoveryRejected,
            message: format!(
                "Journaled call at sequence {} rejected on replay: {}",
                sequence,
                reason.into()
            ),
            offset: None,
            sequence: Some(sequence),
        }
    }

    pub fn id_mismatch(sequence: u64, journaled: u64, assigned: u64) -> Self {
        Self {
            code: RecoveryErrorCode::TweetRecoveryIdMismatch,
            message: format!(
                "Creation at sequence {} journaled id {} but replay assigned {}",
                sequence, journaled, assigned
            ),
            offset: None,
            sequence: Some(sequence),
        }
    }

    pub fn recovery_failed(reason: impl Into<String>) -> Self {
        Self {
            code: RecoveryErrorCode::TweetRecoveryFailed,
            message: reason.into(),
            offset: None,
            sequence: None,
        }
    }

    pub fn code(&self) -> RecoveryErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for RecoveryError {}

/// Result type for recovery operations
pub type RecoveryResult<T> = Result<T, RecoveryError>;
