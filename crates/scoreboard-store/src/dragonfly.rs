//! Dragonfly (Redis-compatible) score store operations.
//!
//! The full dataset is one list under [`MODELS_KEY`]; each element is a
//! JSON-encoded [`ModelRecord`]. List order is the dataset order -- the
//! cache captures it on fetch and cache hits serve exactly that order.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `scores:models` | List | JSON-encoded model score records |

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;
use scoreboard_cache::provider::{DatasetProvider, ProviderError};
use scoreboard_types::ModelRecord;

use crate::error::StoreError;

/// The list key holding the full score dataset.
pub const MODELS_KEY: &str = "scores:models";

/// Connection handle to a Dragonfly (Redis-compatible) instance.
///
/// Wraps a [`fred::prelude::Client`]. One instance is created at
/// process start and shared across requests; `fred` clients are cheap
/// to clone and internally synchronized.
#[derive(Clone)]
pub struct DragonflyStore {
    client: Client,
    fetch_deadline: Option<Duration>,
}

impl DragonflyStore {
    /// Connect to Dragonfly at the given URL.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`. `fetch_deadline` bounds each
    /// [`fetch_all`](DatasetProvider::fetch_all) call; `None` disables
    /// the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Dragonfly`] if the connection fails.
    pub async fn connect(
        url: &str,
        fetch_deadline: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Dragonfly");
        Ok(Self {
            client,
            fetch_deadline,
        })
    }

    /// Replace the stored dataset with `records`, preserving order.
    ///
    /// DEL followed by RPUSH per record. Used by the seed binary; not
    /// on the request path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or a write fails.
    pub async fn replace_all(&self, records: &[ModelRecord]) -> Result<(), StoreError> {
        let _: u32 = self.client.del(MODELS_KEY).await?;
        for record in records {
            let json = serde_json::to_string(record)?;
            let _: u64 = self.client.rpush(MODELS_KEY, json.as_str()).await?;
        }
        tracing::info!(count = records.len(), "Score dataset replaced");
        Ok(())
    }

    /// Read and decode the full list.
    async fn read_all(&self) -> Result<Vec<ModelRecord>, ProviderError> {
        let values: Vec<String> = self
            .client
            .lrange(MODELS_KEY, 0, -1)
            .await
            .map_err(|e| ProviderError::Unreachable {
                message: e.to_string(),
            })?;

        let mut records = Vec::with_capacity(values.len());
        for v in &values {
            let record: ModelRecord =
                serde_json::from_str(v).map_err(|e| ProviderError::Malformed {
                    message: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl DatasetProvider for DragonflyStore {
    async fn fetch_all(&self) -> Result<Vec<ModelRecord>, ProviderError> {
        let Some(deadline) = self.fetch_deadline else {
            return self.read_all().await;
        };

        match tokio::time::timeout(deadline, self.read_all()).await {
            Ok(result) => result,
            Err(elapsed) => {
                tracing::warn!(%elapsed, "score fetch exceeded its deadline");
                Err(ProviderError::Timeout {
                    deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                })
            }
        }
    }
}

impl core::fmt::Debug for DragonflyStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragonflyStore")
            .field("fetch_deadline", &self.fetch_deadline)
            .finish_non_exhaustive()
    }
}
