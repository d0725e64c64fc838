//! IdentityAssigner - dense, monotonic record identifiers
//!
//! - Starts at 0
//! - Advances exactly once per successful creation
//! - Never reused, independent of wall-clock time

use crate::record::RecordId;

/// Issues record identifiers in strictly increasing order.
#[derive(Debug, Default)]
pub struct IdentityAssigner {
    next: u64,
}

impl IdentityAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current counter value and advances it.
    pub fn next_identifier(&mut self) -> RecordId {
        let id = RecordId::new(self.next);
        self.next += 1;
        id
    }

    /// The identifier the next creation will receive.
    pub fn peek(&self) -> RecordId {
        RecordId::new(self.next)
    }
}
