//! Error types for server startup.
//!
//! Startup is fail-fast: any configuration or connection problem
//! aborts the process before it begins serving. A process must never
//! serve with a silently-broken cache or store configuration.

use scoreboard_api::server::ServerError;
use scoreboard_cache::config::ConfigError;
use scoreboard_store::error::StoreError;

/// Errors that abort server startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration failed to load or validate.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The backing store connection failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },
}
