//! PagedReader - bounded reverse-chronological listing
//!
//! Given an upper identifier bound, walks ids from the effective ceiling
//! down to 0 and materializes every record that is not soft-deleted.
//!
//! # Effective ceiling
//!
//! - Empty store: no ceiling, result is empty for every bound
//! - Negative bound: ceiling is the last assigned id (unbounded)
//! - Otherwise: ceiling is `min(bound, last assigned id)`
//!
//! Deleted records are invisible: they are skipped, not marked, and do not
//! count toward the result length. This is a pure read.

use crate::record::{Record, RecordView};

pub struct PagedReader;

impl PagedReader {
    /// Clamped upper id for a store holding `issued` records.
    pub fn effective_ceiling(issued: u64, upper_bound: i64) -> Option<u64> {
        let last_assigned = issued.checked_sub(1)?;
        if upper_bound < 0 {
            Some(last_assigned)
        } else {
            Some(last_assigned.min(upper_bound as u64))
        }
    }

    /// List live records with id <= ceiling, newest first.
    ///
    /// `records` must be dense: `records[i].id() == i`.
    pub fn list(records: &[Record], upper_bound: i64) -> Vec<RecordView> {
        let ceiling = match Self::effective_ceiling(records.len() as u64, upper_bound) {
            Some(c) => c as usize,
            None => return Vec::new(),
        };

        records[..=ceiling]
            .iter()
            .rev()
            .filter(|record| !record.is_deleted())
            .map(Record::view)
            .collect()
    }
}
