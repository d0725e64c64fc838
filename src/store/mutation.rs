//! Mutating calls as data
//!
//! Every state transition the store supports is one `Mutation`. Hosts
//! (mutex wrapper, actor, journal, replay) pass mutations through the
//! `RecordEngine` seam instead of calling the store methods directly.

use crate::record::{CallerId, RecordId, RecordView, ToggleOutcome};

/// Which annotation set a toggle targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    Like,
    Retweet,
}

impl ToggleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleKind::Like => "like",
            ToggleKind::Retweet => "retweet",
        }
    }
}

/// A single mutating call, attributed to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create { caller: CallerId, text: String },
    Update { caller: CallerId, id: RecordId, text: String },
    Delete { caller: CallerId, id: RecordId },
    Toggle { caller: CallerId, id: RecordId, kind: ToggleKind },
}

impl Mutation {
    /// The identity the call is attributed to
    pub fn caller(&self) -> &CallerId {
        match self {
            Mutation::Create { caller, .. }
            | Mutation::Update { caller, .. }
            | Mutation::Delete { caller, .. }
            | Mutation::Toggle { caller, .. } => caller,
        }
    }

    /// Target record, None for creations
    pub fn target(&self) -> Option<RecordId> {
        match self {
            Mutation::Create { .. } => None,
            Mutation::Update { id, .. }
            | Mutation::Delete { id, .. }
            | Mutation::Toggle { id, .. } => Some(*id),
        }
    }

    /// Operation name as used in requests and logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "add_record",
            Mutation::Update { .. } => "update_record",
            Mutation::Delete { .. } => "delete_record",
            Mutation::Toggle { kind: ToggleKind::Like, .. } => "toggle_like",
            Mutation::Toggle { kind: ToggleKind::Retweet, .. } => "toggle_retweet",
        }
    }
}

/// Result of an accepted mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(RecordId),
    Updated,
    Deleted,
    Toggled(ToggleOutcome),
}

impl MutationOutcome {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MutationOutcome::Created(_) => "created",
            MutationOutcome::Updated => "updated",
            MutationOutcome::Deleted => "deleted",
            MutationOutcome::Toggled(_) => "toggled",
        }
    }
}

/// Seam between the record store and whatever hosts it.
///
/// Implementations apply each mutation all-or-nothing: on `Err` no state
/// has changed.
pub trait RecordEngine {
    type Error;

    /// Apply a mutation
    fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, Self::Error>;

    /// Bounded reverse-chronological listing
    fn list(&self, upper_bound: i64) -> Vec<RecordView>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        let caller = CallerId::from("a");
        let id = RecordId::new(0);
        assert_eq!(
            Mutation::Create { caller: caller.clone(), text: "t".into() }.op_name(),
            "add_record"
        );
        assert_eq!(
            Mutation::Toggle { caller: caller.clone(), id, kind: ToggleKind::Like }.op_name(),
            "toggle_like"
        );
        assert_eq!(
            Mutation::Toggle { caller, id, kind: ToggleKind::Retweet }.op_name(),
            "toggle_retweet"
        );
    }

    #[test]
    fn test_target_is_none_for_create() {
        let create = Mutation::Create { caller: CallerId::from("a"), text: String::new() };
        assert_eq!(create.target(), None);

        let delete = Mutation::Delete { caller: CallerId::from("a"), id: RecordId::new(5) };
        assert_eq!(delete.target(), Some(RecordId::new(5)));
        assert_eq!(delete.caller().as_str(), "a");
    }
}
