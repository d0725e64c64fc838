//! Record store engine for tweetdb
//!
//! The store assigns identifiers, enforces author-only mutation, keeps
//! the like/retweet toggle sets and serves bounded reverse-chronological
//! listings with soft-deleted records filtered out.
//!
//! # Components
//!
//! - `IdentityAssigner`: dense monotonic ids starting at 0
//! - `OwnershipGuard`: caller == author check for update and delete
//! - `ToggleSet`: insertion-ordered membership (see `record`)
//! - `PagedReader`: clamped descending walk that skips deleted records
//!
//! The store itself is single-threaded and synchronous. Concurrent hosts
//! live in `host`.

mod config;
mod engine;
mod errors;
mod guard;
mod identity;
mod mutation;
mod paged_reader;

pub use config::{DeletedTogglePolicy, StoreConfig};
pub use engine::RecordStore;
pub use errors::{StoreError, StoreResult};
pub use guard::OwnershipGuard;
pub use identity::IdentityAssigner;
pub use mutation::{Mutation, MutationOutcome, RecordEngine, ToggleKind};
pub use paged_reader::PagedReader;
