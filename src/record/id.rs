//! Identity types for records and callers
//!
//! Both are PURE TYPES: construction and access only. Ordering on
//! `RecordId` is creation order; `CallerId` carries no ordering meaning.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A record identifier, assigned once at creation and never reused.
///
/// Identifiers are dense: every value below the store's next identifier
/// names a stored record.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a new RecordId with the given value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity of whoever invoked an operation.
///
/// The store never verifies identities: the hosting layer supplies a
/// trusted, stable value per actor. Equality is exact byte equality.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    /// Wraps an identity string supplied by the authentication layer.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An identity is well-formed when it is non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
