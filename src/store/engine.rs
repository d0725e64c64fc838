//! RecordStore - the record-store engine
//!
//! Owns the record table and the identifier counter. Every public
//! operation either fully applies or returns an error with no state
//! change. Validation always completes before the first write.

use crate::record::{CallerId, Record, RecordId, RecordView, ToggleOutcome};

use super::config::{DeletedTogglePolicy, StoreConfig};
use super::errors::{StoreError, StoreResult};
use super::guard::OwnershipGuard;
use super::identity::IdentityAssigner;
use super::mutation::{Mutation, MutationOutcome, RecordEngine, ToggleKind};
use super::paged_reader::PagedReader;

/// In-memory record store.
///
/// Records live in a dense vector indexed by id; keys are never removed.
#[derive(Debug, Default)]
pub struct RecordStore {
    config: StoreConfig,
    identity: IdentityAssigner,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            identity: IdentityAssigner::new(),
            records: Vec::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replace the policy applied to subsequent calls. Stored records are
    /// left untouched.
    pub fn set_config(&mut self, config: StoreConfig) {
        self.config = config;
    }

    /// Identifier the next creation will receive
    pub fn next_id(&self) -> RecordId {
        self.identity.peek()
    }

    /// Number of stored records, deleted ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id, deleted or not
    pub fn get(&self, id: RecordId) -> StoreResult<&Record> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.records.get(index))
            .ok_or(StoreError::RecordNotFound(id))
    }

    fn get_mut(&mut self, id: RecordId) -> StoreResult<&mut Record> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.records.get_mut(index))
            .ok_or(StoreError::RecordNotFound(id))
    }

    /// Create a record authored by `caller`. Always succeeds.
    pub fn add_record(&mut self, caller: &CallerId, text: impl Into<String>) -> RecordId {
        let id = self.identity.next_identifier();
        self.records.push(Record::new(id, caller.clone(), text));
        id
    }

    /// Replace a record's text. Author only.
    pub fn update_record(
        &mut self,
        caller: &CallerId,
        id: RecordId,
        text: impl Into<String>,
    ) -> StoreResult<()> {
        let record = self.get_mut(id)?;
        OwnershipGuard::authorize(record, caller)?;
        record.set_text(text);
        Ok(())
    }

    /// Soft-delete a record. Author only; deleting twice is a no-op.
    pub fn delete_record(&mut self, caller: &CallerId, id: RecordId) -> StoreResult<()> {
        let record = self.get_mut(id)?;
        OwnershipGuard::authorize(record, caller)?;
        record.mark_deleted();
        Ok(())
    }

    /// Toggle `caller` in the record's likes.
    pub fn toggle_like(&mut self, caller: &CallerId, id: RecordId) -> StoreResult<ToggleOutcome> {
        self.toggle(caller, id, ToggleKind::Like)
    }

    /// Toggle `caller` in the record's retweets.
    pub fn toggle_retweet(
        &mut self,
        caller: &CallerId,
        id: RecordId,
    ) -> StoreResult<ToggleOutcome> {
        self.toggle(caller, id, ToggleKind::Retweet)
    }

    fn toggle(
        &mut self,
        caller: &CallerId,
        id: RecordId,
        kind: ToggleKind,
    ) -> StoreResult<ToggleOutcome> {
        let policy = self.config.deleted_toggle_policy;
        let record = self.get_mut(id)?;
        if record.is_deleted() && policy == DeletedTogglePolicy::Reject {
            return Err(StoreError::RecordDeleted(id));
        }
        let set = match kind {
            ToggleKind::Like => record.likes_mut(),
            ToggleKind::Retweet => record.retweets_mut(),
        };
        Ok(set.toggle(caller))
    }

    /// Live records with id <= `upper_bound`, newest first.
    /// A negative bound lists everything.
    pub fn list_records(&self, upper_bound: i64) -> Vec<RecordView> {
        PagedReader::list(&self.records, upper_bound)
    }

    /// Check whether `mutation` would be accepted, without applying it.
    pub fn validate(&self, mutation: &Mutation) -> StoreResult<()> {
        match mutation {
            Mutation::Create { .. } => Ok(()),
            Mutation::Update { caller, id, .. } | Mutation::Delete { caller, id } => {
                OwnershipGuard::authorize(self.get(*id)?, caller)
            }
            Mutation::Toggle { id, .. } => {
                let record = self.get(*id)?;
                if record.is_deleted()
                    && self.config.deleted_toggle_policy == DeletedTogglePolicy::Reject
                {
                    return Err(StoreError::RecordDeleted(*id));
                }
                Ok(())
            }
        }
    }
}

impl RecordEngine for RecordStore {
    type Error = StoreError;

    fn apply(&mut self, mutation: Mutation) -> StoreResult<MutationOutcome> {
        match mutation {
            Mutation::Create { caller, text } => {
                Ok(MutationOutcome::Created(self.add_record(&caller, text)))
            }
            Mutation::Update { caller, id, text } => {
                self.update_record(&caller, id, text)?;
                Ok(MutationOutcome::Updated)
            }
            Mutation::Delete { caller, id } => {
                self.delete_record(&caller, id)?;
                Ok(MutationOutcome::Deleted)
            }
            Mutation::Toggle { caller, id, kind } => {
                self.toggle(&caller, id, kind).map(MutationOutcome::Toggled)
            }
        }
    }

    fn list(&self, upper_bound: i64) -> Vec<RecordView> {
        self.list_records(upper_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CallerId {
        CallerId::from("alice")
    }

    fn bob() -> CallerId {
        CallerId::from("bob")
    }

    #[test]
    fn test_ids_are_dense_and_match_position() {
        let mut store = RecordStore::default();
        for i in 0..4 {
            assert_eq!(store.add_record(&alice(), format!("t{}", i)), RecordId::new(i));
        }
        for i in 0..4 {
            assert_eq!(store.get(RecordId::new(i)).unwrap().id(), RecordId::new(i));
        }
        assert_eq!(store.next_id(), RecordId::new(4));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = RecordStore::default();
        store.add_record(&alice(), "a");
        let missing = RecordId::new(1);

        assert_eq!(
            store.update_record(&alice(), missing, "x"),
            Err(StoreError::RecordNotFound(missing))
        );
        assert_eq!(
            store.delete_record(&alice(), missing),
            Err(StoreError::RecordNotFound(missing))
        );
        assert_eq!(
            store.toggle_like(&bob(), missing),
            Err(StoreError::RecordNotFound(missing))
        );
        assert_eq!(
            store.toggle_retweet(&bob(), RecordId::new(u64::MAX)),
            Err(StoreError::RecordNotFound(RecordId::new(u64::MAX)))
        );
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");

        let err = store.update_record(&bob(), id, "x").unwrap_err();
        assert_eq!(err.code(), "TWEET_PERMISSION_DENIED");
        assert_eq!(store.get(id).unwrap().text(), "a");

        store.delete_record(&bob(), id).unwrap_err();
        assert!(!store.get(id).unwrap().is_deleted());
    }

    #[test]
    fn test_author_can_update_deleted_record() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");
        store.delete_record(&alice(), id).unwrap();
        store.update_record(&alice(), id, "b").unwrap();
        store.delete_record(&alice(), id).unwrap();

        let record = store.get(id).unwrap();
        assert!(record.is_deleted());
        assert_eq!(record.text(), "b");
    }

    #[test]
    fn test_author_may_toggle_own_record() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");
        assert_eq!(store.toggle_like(&alice(), id), Ok(ToggleOutcome::Added));
        assert_eq!(store.toggle_retweet(&alice(), id), Ok(ToggleOutcome::Added));
    }

    #[test]
    fn test_likes_and_retweets_are_independent() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");
        store.toggle_like(&bob(), id).unwrap();

        let record = store.get(id).unwrap();
        assert!(record.likes().contains(&bob()));
        assert!(!record.retweets().contains(&bob()));
    }

    #[test]
    fn test_toggle_on_deleted_allowed_by_default() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");
        store.delete_record(&alice(), id).unwrap();

        assert_eq!(store.toggle_like(&bob(), id), Ok(ToggleOutcome::Added));
        assert!(store.get(id).unwrap().likes().contains(&bob()));
    }

    #[test]
    fn test_toggle_on_deleted_rejected_by_policy() {
        let mut store = RecordStore::new(StoreConfig::with_policy(DeletedTogglePolicy::Reject));
        let id = store.add_record(&alice(), "a");
        store.toggle_like(&bob(), id).unwrap();
        store.delete_record(&alice(), id).unwrap();

        assert_eq!(store.toggle_like(&bob(), id), Err(StoreError::RecordDeleted(id)));
        assert_eq!(store.toggle_retweet(&bob(), id), Err(StoreError::RecordDeleted(id)));
        assert!(store.get(id).unwrap().likes().contains(&bob()));
    }

    #[test]
    fn test_set_config_applies_to_later_calls_only() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");
        store.delete_record(&alice(), id).unwrap();
        store.toggle_like(&bob(), id).unwrap();

        store.set_config(StoreConfig::with_policy(DeletedTogglePolicy::Reject));

        assert_eq!(store.config().deleted_toggle_policy, DeletedTogglePolicy::Reject);
        assert_eq!(store.toggle_like(&bob(), id), Err(StoreError::RecordDeleted(id)));
        assert!(store.get(id).unwrap().likes().contains(&bob()));
    }

    #[test]
    fn test_validate_agrees_with_apply() {
        let mut store = RecordStore::default();
        let id = store.add_record(&alice(), "a");

        let denied = Mutation::Update { caller: bob(), id, text: "x".into() };
        assert!(store.validate(&denied).is_err());
        assert!(store.apply(denied).is_err());

        let missing = Mutation::Toggle { caller: bob(), id: RecordId::new(9), kind: ToggleKind::Like };
        assert_eq!(store.validate(&missing), Err(StoreError::RecordNotFound(RecordId::new(9))));

        let accepted = Mutation::Delete { caller: alice(), id };
        assert!(store.validate(&accepted).is_ok());
        assert_eq!(store.apply(accepted), Ok(MutationOutcome::Deleted));
    }

    #[test]
    fn test_apply_create_returns_id() {
        let mut store = RecordStore::default();
        let outcome = store
            .apply(Mutation::Create { caller: alice(), text: "a".into() })
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Created(RecordId::new(0)));
        assert_eq!(store.list(-1).len(), 1);
    }
}
