//! Observable events for tweetdb
//!
//! Events are explicit and typed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    BootStart,
    BootComplete,
    ShutdownStart,
    ShutdownComplete,
    ConfigLoaded,
    /// Ready to accept requests
    Serving,

    // Journal
    WalAppend,
    /// Journal corruption detected (FATAL)
    WalCorruption,

    // Recovery
    RecoveryStart,
    RecoveryReplayBegin,
    RecoveryComplete,
    /// Recovery failed (FATAL)
    RecoveryFailed,

    // Store calls
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    LikeToggled,
    RetweetToggled,
    RecordsListed,
    /// A call was refused and left the store unchanged
    CallRejected,
    /// A request line could not be parsed
    RequestInvalid,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "TWEETDB_STARTUP_BEGIN",
            Event::BootComplete => "TWEETDB_STARTUP_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "TWEETDB_SERVING",

            Event::WalAppend => "WAL_APPEND",
            Event::WalCorruption => "WAL_CORRUPTION",

            Event::RecoveryStart => "RECOVERY_BEGIN",
            Event::RecoveryReplayBegin => "WAL_REPLAY_BEGIN",
            Event::RecoveryComplete => "RECOVERY_COMPLETE",
            Event::RecoveryFailed => "RECOVERY_FAILED",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::LikeToggled => "LIKE_TOGGLED",
            Event::RetweetToggled => "RETWEET_TOGGLED",
            Event::RecordsListed => "RECORDS_LISTED",
            Event::CallRejected => "CALL_REJECTED",
            Event::RequestInvalid => "REQUEST_INVALID",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::WalCorruption | Event::RecoveryFailed)
    }

    /// Rejections are expected traffic, logged one step above INFO
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::CallRejected | Event::RequestInvalid)
    }

    /// Per-call events that are only interesting when tracing
    pub fn is_trace(&self) -> bool {
        matches!(self, Event::WalAppend | Event::RecordsListed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
