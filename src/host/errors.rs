//! Errors surfaced by store hosts

use thiserror::Error;

use crate::recovery::RecoveryError;
use crate::store::StoreError;
use crate::wal::WalError;

#[derive(Debug, Error)]
pub enum HostError {
    /// The store refused the call; nothing changed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The call could not be made durable and was not applied
    #[error(transparent)]
    Journal(#[from] WalError),

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    /// An earlier journal failure stopped the host; the journal tail is
    /// no longer trusted
    #[error("store halted after journal failure")]
    Halted,

    /// The engine answered a call with the outcome of a different kind
    #[error("engine returned {0} for a {1} call")]
    MismatchedOutcome(&'static str, &'static str),

    /// The actor task is gone; no further calls can be served
    #[error("store actor has shut down")]
    ActorClosed,
}

impl HostError {
    pub fn code(&self) -> &'static str {
        match self {
            HostError::Store(e) => e.code(),
            HostError::Journal(e) => e.code(),
            HostError::Recovery(e) => e.code().code(),
            HostError::Halted => "TWEET_HOST_HALTED",
            HostError::MismatchedOutcome(..) => "TWEET_HOST_MISMATCHED_OUTCOME",
            HostError::ActorClosed => "TWEET_HOST_CLOSED",
        }
    }

    /// Fatal errors leave the host unable to serve further calls
    pub fn is_fatal(&self) -> bool {
        match self {
            HostError::Store(_) | HostError::MismatchedOutcome(..) => false,
            HostError::Journal(e) => e.is_fatal(),
            HostError::Recovery(_) | HostError::Halted | HostError::ActorClosed => true,
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;
