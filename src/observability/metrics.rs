//! Metrics registry for tweetdb
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one serving process
///
/// Relaxed atomics: counters are read for reporting only and never
/// drive store behavior.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    records_created: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
    like_toggles: AtomicU64,
    retweet_toggles: AtomicU64,
    lists_served: AtomicU64,
    calls_rejected: AtomicU64,
    wal_records_written: AtomicU64,
    wal_bytes_written: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_records_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_like_toggles(&self) {
        self.like_toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_retweet_toggles(&self) {
        self.retweet_toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lists_served(&self) {
        self.lists_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_calls_rejected(&self) {
        self.calls_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one journal append of `bytes` bytes
    pub fn record_wal_append(&self, bytes: u64) {
        self.wal_records_written.fetch_add(1, Ordering::Relaxed);
        self.wal_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            like_toggles: self.like_toggles.load(Ordering::Relaxed),
            retweet_toggles: self.retweet_toggles.load(Ordering::Relaxed),
            lists_served: self.lists_served.load(Ordering::Relaxed),
            calls_rejected: self.calls_rejected.load(Ordering::Relaxed),
            wal_records: self.wal_records_written.load(Ordering::Relaxed),
            wal_bytes: self.wal_bytes_written.load(Ordering::Relaxed),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time copy of every counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub like_toggles: u64,
    pub retweet_toggles: u64,
    pub lists_served: u64,
    pub calls_rejected: u64,
    pub wal_records: u64,
    pub wal_bytes: u64,
}
