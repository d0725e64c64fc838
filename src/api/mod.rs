//! API layer for tweetdb
//!
//! Line-delimited JSON requests in, one JSON response per request out.
//!
//! # Supported Operations
//!
//! - add_record
//! - update_record
//! - delete_record
//! - toggle_like
//! - toggle_retweet
//! - list_records
//!
//! Error codes from the store and the journal are passed through unchanged.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::{handle_with_actor, mutation_request, ApiHandler};
pub use request::{ListRequest, Request, UNBOUNDED};
pub use response::{ErrorResponse, Response, SuccessResponse};
