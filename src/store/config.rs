//! Store behaviour configuration

use serde::{Deserialize, Serialize};

/// Whether like/retweet toggles are accepted on soft-deleted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedTogglePolicy {
    /// Toggles apply to deleted records like any other
    #[default]
    Allow,
    /// Toggles on deleted records fail with `RecordDeleted`
    Reject,
}

impl DeletedTogglePolicy {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletedTogglePolicy::Allow => "allow",
            DeletedTogglePolicy::Reject => "reject",
        }
    }
}

/// Configuration for a `RecordStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreConfig {
    pub deleted_toggle_policy: DeletedTogglePolicy,
}

impl StoreConfig {
    /// Configuration with the given toggle policy
    pub fn with_policy(deleted_toggle_policy: DeletedTogglePolicy) -> Self {
        Self {
            deleted_toggle_policy,
        }
    }
}
