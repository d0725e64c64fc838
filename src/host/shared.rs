//! Mutex-guarded store for multi-threaded callers
//!
//! Every call takes the lock for its whole duration, so calls are
//! linearized in lock-acquisition order and a listing never observes a
//! half-applied mutation.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::record::{CallerId, RecordId, RecordView, ToggleOutcome};
use crate::store::{Mutation, MutationOutcome, RecordEngine, RecordStore, StoreResult};

/// Cloneable handle to one shared `RecordStore`
#[derive(Debug, Clone, Default)]
pub struct SharedRecordStore {
    inner: Arc<Mutex<RecordStore>>,
}

impl SharedRecordStore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Store calls are all-or-nothing, so a panic in another holder
    /// cannot leave a half-applied call behind; the poisoned guard is
    /// still consistent and is reused.
    fn lock(&self) -> MutexGuard<'_, RecordStore> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_record(&self, caller: &CallerId, text: impl Into<String>) -> RecordId {
        self.lock().add_record(caller, text)
    }

    pub fn update_record(
        &self,
        caller: &CallerId,
        id: RecordId,
        text: impl Into<String>,
    ) -> StoreResult<()> {
        self.lock().update_record(caller, id, text)
    }

    pub fn delete_record(&self, caller: &CallerId, id: RecordId) -> StoreResult<()> {
        self.lock().delete_record(caller, id)
    }

    pub fn toggle_like(&self, caller: &CallerId, id: RecordId) -> StoreResult<ToggleOutcome> {
        self.lock().toggle_like(caller, id)
    }

    pub fn toggle_retweet(&self, caller: &CallerId, id: RecordId) -> StoreResult<ToggleOutcome> {
        self.lock().toggle_retweet(caller, id)
    }

    pub fn list_records(&self, upper_bound: i64) -> Vec<RecordView> {
        self.lock().list_records(upper_bound)
    }

    pub fn apply(&self, mutation: Mutation) -> StoreResult<MutationOutcome> {
        self.lock().apply(mutation)
    }

    /// Run `f` with exclusive access to the store
    pub fn with_store<R>(&self, f: impl FnOnce(&mut RecordStore) -> R) -> R {
        f(&mut self.lock())
    }
}
