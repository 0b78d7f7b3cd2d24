//! Error types for the store's startup and write paths.
//!
//! Read-path failures on the request path surface as
//! [`ProviderError`](scoreboard_cache::ProviderError) instead, because
//! that is the only error the cache layer propagates.

/// Errors that can occur connecting to or writing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A Dragonfly/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A record could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error, e.g. an unparseable URL.
    #[error("Configuration error: {0}")]
    Config(String),
}
