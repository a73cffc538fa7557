//! History Store
//!
//! Append-only, in-memory log of per-tick snapshots with a rolling retention
//! window. The monitor is the only appender; any number of consumers may read
//! concurrently through cloned handles. Entries are never mutated after
//! append and are only dropped by retention pruning.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::Snapshot;

/// Bounded snapshot log. Cloning is cheap; clones share the same log.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<RwLock<VecDeque<Snapshot>>>,
    retention: Duration,
}

impl HistoryStore {
    /// Create a store that retains snapshots for `retention` of wall-clock
    /// time. In practice the store holds at most
    /// `retention / tick_period` entries.
    pub fn new(retention: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(VecDeque::new())),
            retention,
        }
    }

    /// Append a snapshot, then prune entries that fell out of the retention
    /// window relative to the new snapshot's timestamp.
    ///
    /// Snapshots are expected in timestamp order (single appender).
    pub async fn append(&self, snapshot: Snapshot) {
        let cutoff = snapshot.timestamp - self.retention;
        let mut log = self.inner.write().await;
        log.push_back(snapshot);
        while log.front().is_some_and(|s| s.timestamp < cutoff) {
            log.pop_front();
        }
    }

    /// Drop all entries strictly older than `cutoff`. Returns how many were
    /// removed. `append` already prunes automatically; this exists for
    /// consumers that want to free memory ahead of the next tick.
    pub async fn prune_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut log = self.inner.write().await;
        let before = log.len();
        while log.front().is_some_and(|s| s.timestamp < cutoff) {
            log.pop_front();
        }
        before - log.len()
    }

    /// All snapshots with `start <= timestamp <= end`, ascending.
    pub async fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Snapshot> {
        let log = self.inner.read().await;
        log.iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .cloned()
            .collect()
    }

    /// The most recent `limit` snapshots, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<Snapshot> {
        let log = self.inner.read().await;
        log.iter().rev().take(limit).cloned().collect()
    }

    /// Number of retained snapshots.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the store holds no snapshots.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Summary statistics over the retained window.
    pub async fn stats(&self) -> HistoryStats {
        let log = self.inner.read().await;
        HistoryStats {
            snapshot_count: log.len(),
            oldest_timestamp: log.front().map(|s| s.timestamp),
            newest_timestamp: log.back().map(|s| s.timestamp),
        }
    }
}

/// Summary of the retained history window.
#[derive(Debug, Clone)]
pub struct HistoryStats {
    pub snapshot_count: usize,
    pub oldest_timestamp: Option<DateTime<Utc>>,
    pub newest_timestamp: Option<DateTime<Utc>>,
}
