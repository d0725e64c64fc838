//! Record store invariant tests
//!
//! Covers identifier assignment, author-only mutation, toggle-set
//! behavior and bounded listing against the in-memory store.

use tweetdb::record::{CallerId, RecordId, ToggleOutcome};
use tweetdb::store::{DeletedTogglePolicy, RecordStore, StoreConfig, StoreError};

// =============================================================================
// Test Utilities
// =============================================================================

fn alice() -> CallerId {
    CallerId::from("alice")
}

fn bob() -> CallerId {
    CallerId::from("bob")
}

fn listed_ids(store: &RecordStore, upper_bound: i64) -> Vec<u64> {
    store
        .list_records(upper_bound)
        .iter()
        .map(|v| v.id.value())
        .collect()
}

fn store_with(count: u64) -> RecordStore {
    let mut store = RecordStore::default();
    for i in 0..count {
        store.add_record(&alice(), format!("post {}", i));
    }
    store
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_store_lists_nothing() {
    let store = RecordStore::default();
    assert!(store.list_records(-1).is_empty());
    assert!(store.list_records(0).is_empty());
    assert!(store.list_records(100).is_empty());
}

#[test]
fn test_listing_is_newest_first_and_clamped() {
    let mut store = RecordStore::default();
    assert_eq!(store.add_record(&alice(), "a"), RecordId::new(0));
    assert_eq!(store.add_record(&alice(), "b"), RecordId::new(1));

    let views = store.list_records(5);
    assert_eq!(views.len(), 2);
    assert_eq!((views[0].id.value(), views[0].text.as_str()), (1, "b"));
    assert_eq!((views[1].id.value(), views[1].text.as_str()), (0, "a"));
}

#[test]
fn test_author_update_and_foreign_update() {
    let mut store = RecordStore::default();
    let id = store.add_record(&alice(), "a");

    store.update_record(&alice(), id, "a2").unwrap();
    assert_eq!(store.list_records(-1)[0].text, "a2");

    let err = store.update_record(&bob(), id, "x").unwrap_err();
    assert_eq!(err, StoreError::PermissionDenied { id, caller: bob() });
    assert_eq!(store.list_records(-1)[0].text, "a2");
}

#[test]
fn test_deleted_record_is_hidden() {
    let mut store = RecordStore::default();
    let first = store.add_record(&alice(), "a");
    store.add_record(&alice(), "b");

    store.delete_record(&alice(), first).unwrap();

    let views = store.list_records(-1);
    assert_eq!(views.len(), 1);
    assert_eq!((views[0].id.value(), views[0].text.as_str()), (1, "b"));
}

#[test]
fn test_double_like_restores_empty_set() {
    let mut store = store_with(1);
    let id = RecordId::new(0);
    let x = CallerId::from("x");

    assert_eq!(store.toggle_like(&x, id).unwrap(), ToggleOutcome::Added);
    assert_eq!(store.toggle_like(&x, id).unwrap(), ToggleOutcome::Removed);
    assert!(store.list_records(-1)[0].likes.is_empty());
}

#[test]
fn test_retweets_keep_call_order() {
    let mut store = store_with(1);
    let id = RecordId::new(0);
    let callers: Vec<CallerId> = ["e", "c", "a", "d", "b"]
        .into_iter()
        .map(CallerId::from)
        .collect();

    for caller in &callers {
        store.toggle_retweet(caller, id).unwrap();
    }

    let views = store.list_records(-1);
    assert_eq!(views[0].retweets.len(), 5);
    assert_eq!(views[0].retweets, callers);
}

// =============================================================================
// Laws
// =============================================================================

#[test]
fn test_ids_are_dense_in_call_order() {
    let mut store = RecordStore::default();
    let ids: Vec<u64> = (0..50)
        .map(|i| {
            let caller = CallerId::new(format!("user{}", i % 7));
            store.add_record(&caller, "t").value()
        })
        .collect();
    assert_eq!(ids, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_ids_are_never_reused_after_delete() {
    let mut store = store_with(3);
    store.delete_record(&alice(), RecordId::new(2)).unwrap();
    assert_eq!(store.add_record(&alice(), "next"), RecordId::new(3));
}

#[test]
fn test_non_author_never_mutates() {
    let mut store = store_with(4);

    for i in 0..4 {
        let id = RecordId::new(i);
        assert!(matches!(
            store.update_record(&bob(), id, "hijack"),
            Err(StoreError::PermissionDenied { .. })
        ));
        assert!(matches!(
            store.delete_record(&bob(), id),
            Err(StoreError::PermissionDenied { .. })
        ));
    }

    let views = store.list_records(-1);
    assert_eq!(views.len(), 4);
    assert!(views.iter().all(|v| v.text.starts_with("post") && !v.deleted));
}

#[test]
fn test_unknown_id_is_not_found_for_every_operation() {
    let mut store = store_with(2);
    let missing = RecordId::new(2);

    assert_eq!(
        store.update_record(&alice(), missing, "x"),
        Err(StoreError::RecordNotFound(missing))
    );
    assert_eq!(
        store.delete_record(&alice(), missing),
        Err(StoreError::RecordNotFound(missing))
    );
    assert_eq!(
        store.toggle_like(&alice(), missing),
        Err(StoreError::RecordNotFound(missing))
    );
    assert_eq!(
        store.toggle_retweet(&alice(), missing),
        Err(StoreError::RecordNotFound(missing))
    );
}

#[test]
fn test_toggle_pair_restores_membership_but_moves_to_end() {
    let mut store = store_with(1);
    let id = RecordId::new(0);
    for name in ["a", "b", "c"] {
        store.toggle_like(&CallerId::from(name), id).unwrap();
    }

    store.toggle_like(&CallerId::from("a"), id).unwrap();
    store.toggle_like(&CallerId::from("a"), id).unwrap();

    let likes = store.list_records(-1)[0].likes.clone();
    let names: Vec<&str> = likes.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, vec!["b", "c", "a"]);
}

#[test]
fn test_deleted_ids_never_listed_for_any_bound() {
    let mut store = store_with(6);
    store.delete_record(&alice(), RecordId::new(1)).unwrap();
    store.delete_record(&alice(), RecordId::new(4)).unwrap();

    for bound in -3..10 {
        let ids = listed_ids(&store, bound);
        assert!(!ids.contains(&1), "bound {}", bound);
        assert!(!ids.contains(&4), "bound {}", bound);
    }
}

#[test]
fn test_bound_and_ordering_laws() {
    let mut store = store_with(8);
    store.delete_record(&alice(), RecordId::new(3)).unwrap();

    assert_eq!(listed_ids(&store, -1), vec![7, 6, 5, 4, 2, 1, 0]);

    for bound in 0..12i64 {
        let ids = listed_ids(&store, bound);
        assert!(ids.iter().all(|&id| id as i64 <= bound));
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }
}

#[test]
fn test_any_negative_bound_lists_everything() {
    let store = store_with(3);
    assert_eq!(listed_ids(&store, -1), listed_ids(&store, i64::MIN));
}

#[test]
fn test_repeated_delete_is_a_no_op() {
    let mut store = store_with(1);
    let id = RecordId::new(0);
    store.delete_record(&alice(), id).unwrap();
    store.delete_record(&alice(), id).unwrap();
    assert!(store.get(id).unwrap().is_deleted());
}

// =============================================================================
// Deleted-record toggle policy
// =============================================================================

#[test]
fn test_allow_policy_toggles_deleted_records() {
    let mut store = store_with(1);
    let id = RecordId::new(0);
    store.delete_record(&alice(), id).unwrap();

    assert_eq!(store.toggle_like(&bob(), id).unwrap(), ToggleOutcome::Added);
    assert!(store.get(id).unwrap().likes().contains(&bob()));
}

#[test]
fn test_reject_policy_refuses_toggles_on_deleted_records() {
    let mut store = RecordStore::new(StoreConfig::with_policy(DeletedTogglePolicy::Reject));
    let id = store.add_record(&alice(), "a");
    store.toggle_like(&bob(), id).unwrap();
    store.delete_record(&alice(), id).unwrap();

    assert_eq!(store.toggle_like(&bob(), id), Err(StoreError::RecordDeleted(id)));
    assert_eq!(store.toggle_retweet(&bob(), id), Err(StoreError::RecordDeleted(id)));
    assert!(store.get(id).unwrap().likes().contains(&bob()));
}
