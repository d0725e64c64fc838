//! API Handler for tweetdb
//!
//! Parses one request line, dispatches it to a record engine and renders
//! the response. The handler owns its engine, so requests through one
//! handler are serialized by `&mut self`.

use serde_json::{json, Value};

use crate::host::StoreHandle;
use crate::observability::{log_event_with_fields, Event};
use crate::record::{RecordId, RecordView};
use crate::store::{Mutation, MutationOutcome, RecordEngine};

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::Response;

pub struct ApiHandler<E> {
    engine: E,
}

impl<E> ApiHandler<E>
where
    E: RecordEngine,
    E::Error: Into<ApiError>,
{
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Handle a raw JSON request line
    pub fn handle(&mut self, json_request: &str) -> Response {
        let request = match parse_logged(json_request) {
            Ok(r) => r,
            Err(e) => return Response::error(&e),
        };

        match self.execute(request) {
            Ok(data) => Response::success(data),
            Err(e) => Response::error(&e),
        }
    }

    pub fn execute(&mut self, request: Request) -> ApiResult<Value> {
        match request {
            Request::Mutate(mutation) => {
                let target = mutation.target();
                let outcome = self.engine.apply(mutation).map_err(Into::into)?;
                Ok(outcome_json(outcome, target))
            }
            Request::List(list) => Ok(views_json(self.engine.list(list.upper_bound))),
        }
    }
}

/// Handle a raw JSON request line through a store actor
pub async fn handle_with_actor(handle: &StoreHandle, json_request: &str) -> Response {
    let request = match parse_logged(json_request) {
        Ok(r) => r,
        Err(e) => return Response::error(&e),
    };

    let result = match request {
        Request::Mutate(mutation) => {
            let target = mutation.target();
            handle
                .apply(mutation)
                .await
                .map(|outcome| outcome_json(outcome, target))
        }
        Request::List(list) => handle.list_records(list.upper_bound).await.map(views_json),
    };

    match result {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&ApiError::from(e)),
    }
}

fn parse_logged(json_request: &str) -> ApiResult<Request> {
    Request::parse(json_request).map_err(|e| {
        log_event_with_fields(
            Event::RequestInvalid,
            &[("code", e.code()), ("message", e.message())],
        );
        e
    })
}

fn outcome_json(outcome: MutationOutcome, target: Option<RecordId>) -> Value {
    match outcome {
        MutationOutcome::Created(id) => json!({ "id": id }),
        MutationOutcome::Updated | MutationOutcome::Deleted => json!({ "id": target }),
        MutationOutcome::Toggled(toggle) => json!({
            "id": target,
            "outcome": toggle.as_str(),
        }),
    }
}

fn views_json(views: Vec<RecordView>) -> Value {
    json!(views)
}

/// Build the request line for `mutation`, the inverse of `Request::parse`
pub fn mutation_request(mutation: &Mutation) -> Value {
    let mut request = json!({
        "op": mutation.op_name(),
        "caller": mutation.caller().as_str(),
    });
    if let Some(id) = mutation.target() {
        request["id"] = json!(id);
    }
    match mutation {
        Mutation::Create { text, .. } | Mutation::Update { text, .. } => {
            request["text"] = json!(text);
        }
        Mutation::Delete { .. } | Mutation::Toggle { .. } => {}
    }
    request
}
