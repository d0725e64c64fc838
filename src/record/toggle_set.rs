//! Ordered membership set with toggle semantics
//!
//! Likes and retweets are both instances of `ToggleSet`. Members are kept
//! in insertion order; a member removed and later re-added goes to the end.
//!
//! Membership tests are O(1) through a hash index. Removal shifts the
//! tail of the order list, which is O(n) in the set size.

use std::collections::HashSet;

use super::id::CallerId;

/// Outcome of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Caller was absent and has been appended
    Added,
    /// Caller was present and has been removed
    Removed,
}

impl ToggleOutcome {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
        }
    }
}

/// Insertion-ordered set of caller identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleSet {
    order: Vec<CallerId>,
    index: HashSet<CallerId>,
}

impl ToggleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `caller` if present, otherwise append it.
    pub fn toggle(&mut self, caller: &CallerId) -> ToggleOutcome {
        if self.index.remove(caller) {
            self.order.retain(|member| member != caller);
            ToggleOutcome::Removed
        } else {
            self.index.insert(caller.clone());
            self.order.push(caller.clone());
            ToggleOutcome::Added
        }
    }

    /// O(1) membership test
    pub fn contains(&self, caller: &CallerId) -> bool {
        self.index.contains(caller)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CallerId> {
        self.order.iter()
    }

    /// Copy of the members in insertion order
    pub fn snapshot(&self) -> Vec<CallerId> {
        self.order.clone()
    }
}
