//! Hosts for the record store
//!
//! The store itself is synchronous and single-owner. A host decides how
//! concurrent callers reach it and whether calls are made durable:
//!
//! - `SharedRecordStore`: `Arc<Mutex<_>>` for threaded callers
//! - `StoreActor` / `StoreHandle`: one task owns the engine, callers queue
//! - `JournaledStore`: journal-backed engine rebuilt by replay on open

mod actor;
mod errors;
mod journaled;
mod shared;

pub use actor::{StoreActor, StoreHandle, DEFAULT_QUEUE_CAPACITY};
pub use errors::{HostError, HostResult};
pub use journaled::JournaledStore;
pub use shared::SharedRecordStore;
