//! Record data model for tweetdb
//!
//! A record is one post with an immutable author, owner-writable text,
//! a one-way deletion flag and two ordered annotation sets (likes and
//! retweets).

mod id;
#[allow(clippy::module_inception)]
mod record;
mod toggle_set;

pub use id::{CallerId, RecordId};
pub use record::{Record, RecordView};
pub use toggle_set::{ToggleOutcome, ToggleSet};
