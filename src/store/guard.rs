//! OwnershipGuard - author-only mutation check
//!
//! A single equality test against the stored author. Applies to text
//! updates and soft deletes; creation and toggles are not gated.

use crate::record::{CallerId, Record};

use super::errors::{StoreError, StoreResult};

pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Succeeds iff `caller` authored `record`.
    pub fn authorize(record: &Record, caller: &CallerId) -> StoreResult<()> {
        if record.author() == caller {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied {
                id: record.id(),
                caller: caller.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    #[test]
    fn test_author_is_authorized() {
        let record = Record::new(RecordId::new(0), CallerId::from("alice"), "a");
        assert!(OwnershipGuard::authorize(&record, &CallerId::from("alice")).is_ok());
    }

    #[test]
    fn test_other_caller_is_denied() {
        let record = Record::new(RecordId::new(2), CallerId::from("alice"), "a");
        let err = OwnershipGuard::authorize(&record, &CallerId::from("bob")).unwrap_err();
        assert_eq!(
            err,
            StoreError::PermissionDenied {
                id: RecordId::new(2),
                caller: CallerId::from("bob"),
            }
        );
    }
}
