//! tweetdb - A strict, deterministic, author-owned record store for short posts
//!
//! Records carry text authored by a caller, a soft-delete flag and two
//! insertion-ordered toggle sets (likes and retweets). Only the author may
//! edit or delete; anyone may toggle. Listings walk ids downward from a
//! clamped ceiling and skip deleted records.

pub mod api;
pub mod cli;
pub mod host;
pub mod observability;
pub mod record;
pub mod recovery;
pub mod store;
pub mod wal;
