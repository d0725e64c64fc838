//! Recovery subsystem for tweetdb
//!
//! Rebuilds the record store by replaying the call journal.
//!
//! # Invariants
//!
//! - The journal is the single source of truth for recovery
//! - Sequential replay from byte 0
//! - Halt on corruption or on any replayed call the store rejects

mod errors;
mod replay;
mod startup;

pub use errors::{RecoveryError, RecoveryErrorCode, RecoveryResult};
pub use replay::{JournalReplayer, ReplayStats, WalRead};
pub use startup::{RecoveryManager, RecoveryState};
