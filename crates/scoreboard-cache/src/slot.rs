//! The one-snapshot cache slot and the freshness rule.
//!
//! Each process owns exactly one [`SnapshotSlot`]: an optional
//! [`ScoreSnapshot`] replaced wholesale on every successful refresh.
//! The slot never judges freshness itself -- [`is_fresh`] is a pure
//! function so the TTL boundary can be tested without a clock.
//!
//! The slot is shared across concurrent requests within the process,
//! so replacement swaps an [`Arc`] under a write lock held only for
//! the swap; the read path clones the `Arc` and nothing else.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use scoreboard_types::{ModelRecord, ScoreSnapshot};
use tokio::sync::RwLock;

/// Process-local slot holding at most one dataset snapshot.
///
/// Created empty at process start, populated on the first successful
/// fetch, and discarded with the process. Generation numbers are
/// assigned here and never move backward within a process lifetime.
#[derive(Debug)]
pub struct SnapshotSlot {
    snapshot: RwLock<Option<Arc<ScoreSnapshot>>>,
    next_generation: AtomicU64,
}

impl SnapshotSlot {
    /// Create an empty slot. The first replacement gets generation 1.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Return the slot's snapshot if one exists.
    ///
    /// Does not judge freshness; a stale snapshot is still returned.
    pub async fn current(&self) -> Option<Arc<ScoreSnapshot>> {
        self.snapshot.read().await.clone()
    }

    /// Atomically swap in a new snapshot built from `records`.
    ///
    /// Full replacement only, no merge. The new snapshot receives the
    /// next generation number and `captured_at` as its capture time.
    /// Returns the snapshot that is now current.
    pub async fn replace(
        &self,
        records: Vec<ModelRecord>,
        captured_at: DateTime<Utc>,
    ) -> Arc<ScoreSnapshot> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(ScoreSnapshot {
            records,
            captured_at,
            generation,
        });
        *self.snapshot.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }
}

impl Default for SnapshotSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The freshness rule: true iff `now - snapshot.captured_at < ttl`.
///
/// Strict comparison -- a snapshot whose age equals the TTL is stale.
/// A TTL of zero therefore disables caching entirely. Callers capture
/// `now` once per request so the boundary cannot move mid-decision.
pub fn is_fresh(snapshot: &ScoreSnapshot, now: DateTime<Utc>, ttl: Duration) -> bool {
    snapshot.age(now) < ttl
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::*;

    fn records() -> Vec<ModelRecord> {
        vec![ModelRecord {
            model_name: String::from("gpt-x"),
            provider: String::from("Test Lab"),
            context_window: 8192,
            score: Decimal::new(9, 1),
        }]
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[tokio::test]
    async fn new_slot_is_empty() {
        let slot = SnapshotSlot::new();
        assert!(slot.current().await.is_none());
    }

    #[tokio::test]
    async fn replace_populates_and_increments_generation() {
        let slot = SnapshotSlot::new();

        let first = slot.replace(records(), at(0)).await;
        assert_eq!(first.generation, 1);

        let second = slot.replace(records(), at(301)).await;
        assert_eq!(second.generation, 2);

        let current = slot.current().await.unwrap();
        assert_eq!(current.generation, 2);
        assert_eq!(current.captured_at, at(301));
    }

    #[tokio::test]
    async fn current_returns_the_same_snapshot_it_holds() {
        let slot = SnapshotSlot::new();
        let replaced = slot.replace(records(), at(0)).await;
        let current = slot.current().await.unwrap();
        assert!(Arc::ptr_eq(&replaced, &current));
    }

    #[test]
    fn fresh_strictly_inside_the_window() {
        let snapshot = ScoreSnapshot {
            records: records(),
            captured_at: at(0),
            generation: 1,
        };
        let ttl = Duration::seconds(300);

        assert!(is_fresh(&snapshot, at(0), ttl));
        assert!(is_fresh(&snapshot, at(299), ttl));
        // Age equal to the TTL is stale, not fresh.
        assert!(!is_fresh(&snapshot, at(300), ttl));
        assert!(!is_fresh(&snapshot, at(301), ttl));
    }

    #[test]
    fn zero_ttl_is_never_fresh() {
        let snapshot = ScoreSnapshot {
            records: records(),
            captured_at: at(0),
            generation: 1,
        };
        assert!(!is_fresh(&snapshot, at(0), Duration::zero()));
    }
}
