//! Dataset provider trait and stub implementation.
//!
//! On a cache miss the [`FetchCoordinator`](crate::coordinator) needs
//! the full dataset from the backing store. The [`DatasetProvider`]
//! trait abstracts that store -- in production it is a
//! Dragonfly/Redis-compatible instance (`scoreboard-store`), in tests a
//! scripted stub. The coordinator never distinguishes failure
//! sub-causes; it propagates [`ProviderError`] unchanged and the
//! category only feeds the `error_kind` telemetry field.

use async_trait::async_trait;
use scoreboard_types::ModelRecord;

/// Errors surfaced by a dataset provider.
///
/// Latency and failure characteristics of the backing store are opaque
/// to the cache layer; these categories exist for telemetry, not for
/// branching.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The backing store could not be reached or rejected the request.
    #[error("dataset provider unreachable: {message}")]
    Unreachable {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The fetch did not complete within the configured deadline.
    #[error("dataset provider timed out after {deadline_ms}ms")]
    Timeout {
        /// The deadline that elapsed, in milliseconds.
        deadline_ms: u64,
    },

    /// The backing store answered with data that does not decode.
    #[error("dataset provider returned malformed data: {message}")]
    Malformed {
        /// Description of the decode failure.
        message: String,
    },
}

impl ProviderError {
    /// Stable category string used in the `error_kind` telemetry field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "unreachable",
            Self::Timeout { .. } => "timeout",
            Self::Malformed { .. } => "malformed",
        }
    }
}

/// A source of the full score dataset.
///
/// Implementations return every record in a stable order; the order is
/// captured into the snapshot and preserved by cache hits. One
/// instance is created per process and shared across requests, so
/// implementations must be internally synchronized.
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Fetch the complete dataset.
    ///
    /// Pagination is deliberately absent -- the dataset is small enough
    /// to be fetched in full on every miss.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the store is unreachable, the
    /// configured deadline elapses, or the stored data does not decode.
    async fn fetch_all(&self) -> Result<Vec<ModelRecord>, ProviderError>;
}

/// A provider that always returns a fixed record list.
///
/// Used to exercise the coordinator and the HTTP layer without a live
/// backing store.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<ModelRecord>,
}

impl StaticProvider {
    /// Create a stub provider serving `records` on every fetch.
    pub const fn new(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetProvider for StaticProvider {
    async fn fetch_all(&self) -> Result<Vec<ModelRecord>, ProviderError> {
        Ok(self.records.clone())
    }
}
