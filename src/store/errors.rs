//! # Store Errors
//!
//! Rejections raised by the record store. Every rejection is recoverable
//! and leaves the store exactly as it was before the call.

use thiserror::Error;

use crate::record::{CallerId, RecordId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store rejections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Caller is not the record's author
    #[error("Caller {caller} is not the author of record {id}")]
    PermissionDenied { id: RecordId, caller: CallerId },

    /// Identifier was never assigned
    #[error("Record {0} not found")]
    RecordNotFound(RecordId),

    /// Toggle on a soft-deleted record under the reject policy
    #[error("Record {0} is deleted")]
    RecordDeleted(RecordId),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::PermissionDenied { .. } => "TWEET_PERMISSION_DENIED",
            StoreError::RecordNotFound(_) => "TWEET_RECORD_NOT_FOUND",
            StoreError::RecordDeleted(_) => "TWEET_RECORD_DELETED",
        }
    }
}
