//! API request types
//!
//! One JSON object per request line.

use serde::{Deserialize, Serialize};

use crate::record::{CallerId, RecordId};
use crate::store::{Mutation, ToggleKind};

use super::errors::{ApiError, ApiResult};

/// Listing with no ceiling
pub const UNBOUNDED: i64 = -1;

/// Listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub upper_bound: i64,
}

/// Unified request envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Mutate(Mutation),
    List(ListRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    caller: Option<String>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    upper_bound: Option<i64>,
}

impl RawRequest {
    fn caller(&self) -> ApiResult<CallerId> {
        let caller = self
            .caller
            .as_deref()
            .map(CallerId::new)
            .ok_or_else(|| ApiError::invalid_request("Missing caller"))?;
        if !caller.is_well_formed() {
            return Err(ApiError::invalid_request("Empty caller"));
        }
        Ok(caller)
    }

    fn id(&self) -> ApiResult<RecordId> {
        self.id
            .map(RecordId::new)
            .ok_or_else(|| ApiError::invalid_request("Missing id"))
    }

    fn text(&mut self) -> ApiResult<String> {
        self.text
            .take()
            .ok_or_else(|| ApiError::invalid_request("Missing text"))
    }
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let mut raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        let op = std::mem::take(&mut raw.op);
        let mutation = match op.as_str() {
            "add_record" => Mutation::Create {
                caller: raw.caller()?,
                text: raw.text()?,
            },
            "update_record" => Mutation::Update {
                caller: raw.caller()?,
                id: raw.id()?,
                text: raw.text()?,
            },
            "delete_record" => Mutation::Delete {
                caller: raw.caller()?,
                id: raw.id()?,
            },
            "toggle_like" => Mutation::Toggle {
                caller: raw.caller()?,
                id: raw.id()?,
                kind: ToggleKind::Like,
            },
            "toggle_retweet" => Mutation::Toggle {
                caller: raw.caller()?,
                id: raw.id()?,
                kind: ToggleKind::Retweet,
            },
            "list_records" => {
                return Ok(Request::List(ListRequest {
                    upper_bound: raw.upper_bound.unwrap_or(UNBOUNDED),
                }))
            }
            other => return Err(ApiError::unknown_operation(other)),
        };

        Ok(Request::Mutate(mutation))
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Request::Mutate(m) => m.op_name(),
            Request::List(_) => "list_records",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_record() {
        let req = Request::parse(r#"{"op": "add_record", "caller": "alice", "text": "hi"}"#).unwrap();
        assert_eq!(
            req,
            Request::Mutate(Mutation::Create {
                caller: CallerId::from("alice"),
                text: "hi".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_toggle_retweet() {
        let req = Request::parse(r#"{"op": "toggle_retweet", "caller": "bob", "id": 3}"#).unwrap();
        assert_eq!(
            req,
            Request::Mutate(Mutation::Toggle {
                caller: CallerId::from("bob"),
                id: RecordId::new(3),
                kind: ToggleKind::Retweet,
            })
        );
        assert_eq!(req.op_name(), "toggle_retweet");
    }

    #[test]
    fn test_list_defaults_to_unbounded() {
        let req = Request::parse(r#"{"op": "list_records"}"#).unwrap();
        assert_eq!(req, Request::List(ListRequest { upper_bound: -1 }));

        let req = Request::parse(r#"{"op": "list_records", "upper_bound": 7}"#).unwrap();
        assert_eq!(req, Request::List(ListRequest { upper_bound: 7 }));
    }

    #[test]
    fn test_empty_text_is_accepted() {
        let req = Request::parse(r#"{"op": "update_record", "caller": "a", "id": 0, "text": ""}"#);
        assert!(req.is_ok());
    }

    #[test]
    fn test_missing_and_empty_caller() {
        let err = Request::parse(r#"{"op": "delete_record", "id": 0}"#).unwrap_err();
        assert_eq!(err.message(), "Missing caller");

        let err = Request::parse(r#"{"op": "toggle_like", "caller": "", "id": 0}"#).unwrap_err();
        assert_eq!(err.code(), "TWEET_INVALID_REQUEST");
        assert_eq!(err.message(), "Empty caller");
    }

    #[test]
    fn test_missing_fields() {
        let err = Request::parse(r#"{"op": "add_record", "caller": "a"}"#).unwrap_err();
        assert_eq!(err.message(), "Missing text");

        let err = Request::parse(r#"{"op": "toggle_like", "caller": "a"}"#).unwrap_err();
        assert_eq!(err.message(), "Missing id");
    }

    #[test]
    fn test_negative_id_is_invalid_json() {
        let err = Request::parse(r#"{"op": "delete_record", "caller": "a", "id": -1}"#).unwrap_err();
        assert_eq!(err.code(), "TWEET_INVALID_REQUEST");
    }

    #[test]
    fn test_parse_unknown_op() {
        let err = Request::parse(r#"{"op": "drop_all"}"#).unwrap_err();
        assert_eq!(err.code(), "TWEET_UNKNOWN_OPERATION");
    }
}
