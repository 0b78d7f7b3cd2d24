//! Score records, snapshots, and serving provenance.
//!
//! A [`ModelRecord`] is one entry of the dataset: a model name and its
//! evaluation score plus the descriptive fields the backing store keeps
//! alongside it. A [`ScoreSnapshot`] is an immutable, timestamped copy
//! of the full dataset as returned by one provider fetch; the cache
//! layer holds at most one per process and replaces it wholesale.
//!
//! Scores are [`Decimal`] rather than `f64` so values like `95.5`
//! round-trip the store without binary-float drift.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of the model score dataset.
///
/// `model_name` is unique within a snapshot; the cache layer never
/// inspects it, uniqueness is the store's concern. Records are
/// immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// The model's display name, e.g. `"Claude 3 Opus"`.
    pub model_name: String,
    /// The organization that publishes the model.
    pub provider: String,
    /// Maximum context window in tokens.
    pub context_window: u32,
    /// Benchmark score for the model.
    pub score: Decimal,
}

/// An immutable, timestamped copy of the full dataset.
///
/// Produced by one successful provider fetch. `records` preserves the
/// order the provider returned; a cache hit serves exactly this order.
/// `generation` increases by one with every replacement within a
/// process and never moves backward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// The records in provider order.
    pub records: Vec<ModelRecord>,
    /// When the fetch that produced this snapshot happened.
    pub captured_at: DateTime<Utc>,
    /// Monotonic replacement counter, starting at 1 for the first fetch.
    pub generation: u64,
}

impl ScoreSnapshot {
    /// The snapshot's age at `now`.
    ///
    /// Negative if `now` is before `captured_at`, which only occurs if
    /// the wall clock moves backward between calls.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.captured_at)
    }
}

/// Where a served snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Served from the in-memory snapshot without touching the provider.
    CacheHit,
    /// The snapshot was stale or absent and a fresh fetch replaced it.
    CacheMissRefreshed,
}

impl Provenance {
    /// Stable string form used in telemetry fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CacheHit => "cache_hit",
            Self::CacheMissRefreshed => "cache_miss_refreshed",
        }
    }
}

impl core::fmt::Display for Provenance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
