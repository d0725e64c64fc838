//! Stored record and its read-only view

use serde::{Deserialize, Serialize};

use super::id::{CallerId, RecordId};
use super::toggle_set::ToggleSet;

/// One stored post.
///
/// `id` and `author` are fixed at creation. `deleted` only ever moves from
/// false to true. Records are never physically removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    author: CallerId,
    text: String,
    deleted: bool,
    likes: ToggleSet,
    retweets: ToggleSet,
}

impl Record {
    /// Create a live record with empty annotation sets
    pub fn new(id: RecordId, author: CallerId, text: impl Into<String>) -> Self {
        Self {
            id,
            author,
            text: text.into(),
            deleted: false,
            likes: ToggleSet::new(),
            retweets: ToggleSet::new(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn author(&self) -> &CallerId {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn likes(&self) -> &ToggleSet {
        &self.likes
    }

    pub fn retweets(&self) -> &ToggleSet {
        &self.retweets
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// One-way transition; repeated calls are no-ops
    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub(crate) fn likes_mut(&mut self) -> &mut ToggleSet {
        &mut self.likes
    }

    pub(crate) fn retweets_mut(&mut self) -> &mut ToggleSet {
        &mut self.retweets
    }

    /// Materialize a snapshot for readers
    pub fn view(&self) -> RecordView {
        RecordView {
            id: self.id,
            text: self.text.clone(),
            deleted: self.deleted,
            likes: self.likes.snapshot(),
            retweets: self.retweets.snapshot(),
        }
    }
}

/// Snapshot of a record as returned by listings.
///
/// `deleted` is always false in listing results; the field stays in the
/// schema so clients can rely on its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: RecordId,
    pub text: String,
    pub deleted: bool,
    pub likes: Vec<CallerId>,
    pub retweets: Vec<CallerId>,
}
