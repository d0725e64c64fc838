//! Request API tests
//!
//! Drives the line protocol end to end against both the in-memory store
//! and the journaled store.

use serde_json::{json, Value};
use tempfile::TempDir;
use tweetdb::api::{mutation_request, ApiHandler, Response};
use tweetdb::host::JournaledStore;
use tweetdb::record::{CallerId, RecordId};
use tweetdb::store::{Mutation, RecordStore, StoreConfig};

fn ok_data(resp: Response) -> Value {
    assert!(resp.is_success(), "unexpected error: {}", resp.to_json());
    let parsed: Value = serde_json::from_str(&resp.to_json()).unwrap();
    parsed["data"].clone()
}

#[test]
fn test_full_session_over_memory_store() {
    let mut handler = ApiHandler::new(RecordStore::default());

    let a = ok_data(handler.handle(r#"{"op":"add_record","caller":"alice","text":"a"}"#));
    let b = ok_data(handler.handle(r#"{"op":"add_record","caller":"alice","text":"b"}"#));
    assert_eq!((a["id"].clone(), b["id"].clone()), (json!(0), json!(1)));

    ok_data(handler.handle(r#"{"op":"update_record","caller":"alice","id":0,"text":"a2"}"#));
    ok_data(handler.handle(r#"{"op":"toggle_retweet","caller":"bob","id":0}"#));

    let listing = ok_data(handler.handle(r#"{"op":"list_records","upper_bound":5}"#));
    assert_eq!(
        listing,
        json!([
            {"id": 1, "text": "b", "deleted": false, "likes": [], "retweets": []},
            {"id": 0, "text": "a2", "deleted": false, "likes": [], "retweets": ["bob"]},
        ])
    );

    ok_data(handler.handle(r#"{"op":"delete_record","caller":"alice","id":1}"#));
    let listing = ok_data(handler.handle(r#"{"op":"list_records","upper_bound":-1}"#));
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["id"], 0);
}

#[test]
fn test_error_codes_for_each_failure_kind() {
    let mut handler = ApiHandler::new(RecordStore::default());
    handler.handle(r#"{"op":"add_record","caller":"alice","text":"a"}"#);

    let cases = [
        ("{", "TWEET_INVALID_REQUEST"),
        (r#"{"op":"add_record","text":"no caller"}"#, "TWEET_INVALID_REQUEST"),
        (r#"{"op":"add_record","caller":"","text":"x"}"#, "TWEET_INVALID_REQUEST"),
        (r#"{"op":"like"}"#, "TWEET_UNKNOWN_OPERATION"),
        (r#"{"op":"delete_record","caller":"bob","id":0}"#, "TWEET_PERMISSION_DENIED"),
        (r#"{"op":"toggle_like","caller":"bob","id":9}"#, "TWEET_RECORD_NOT_FOUND"),
    ];

    for (line, code) in cases {
        let resp = handler.handle(line);
        assert_eq!(resp.error_code(), Some(code), "{}", line);
    }

    // None of the failures changed anything
    assert_eq!(handler.engine().len(), 1);
    assert!(handler.engine().list_records(-1)[0].likes.is_empty());
}

#[test]
fn test_journaled_handler_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let mutations = [
        Mutation::Create { caller: CallerId::from("alice"), text: "persisted".into() },
        Mutation::Toggle {
            caller: CallerId::from("bob"),
            id: RecordId::new(0),
            kind: tweetdb::store::ToggleKind::Like,
        },
    ];

    {
        let store = JournaledStore::open(temp_dir.path(), StoreConfig::default()).unwrap();
        let mut handler = ApiHandler::new(store);
        for mutation in &mutations {
            ok_data(handler.handle(&mutation_request(mutation).to_string()));
        }
        handler.into_engine().shutdown().unwrap();
    }

    let store = JournaledStore::open(temp_dir.path(), StoreConfig::default()).unwrap();
    let mut handler = ApiHandler::new(store);
    let listing = ok_data(handler.handle(r#"{"op":"list_records"}"#));
    assert_eq!(listing[0]["text"], "persisted");
    assert_eq!(listing[0]["likes"], json!(["bob"]));
}
