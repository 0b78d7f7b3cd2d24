//! Scoreboard server binary.
//!
//! Wires configuration, the Dragonfly-backed dataset provider, the
//! fetch coordinator, and the HTTP server into one process. The cache
//! slot lives and dies with this process; the platform may destroy the
//! process at any time.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `scoreboard-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Validate the configuration (fail fast on a bad TTL)
//! 4. Connect to the Dragonfly score store
//! 5. Assemble the fetch coordinator and shared state
//! 6. Serve until the platform stops the process

mod error;

use std::path::Path;
use std::sync::Arc;

use scoreboard_api::server::{ServerConfig, start_server};
use scoreboard_api::state::AppState;
use scoreboard_cache::config::{ConfigError, ServiceConfig};
use scoreboard_cache::coordinator::FetchCoordinator;
use scoreboard_cache::telemetry::{TelemetrySink, TracingSink};
use scoreboard_store::DragonflyStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

/// Application entry point for the Scoreboard server.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Load configuration before logging is up; the outcome is
    //    logged right after the subscriber is installed.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the
    //    configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("scoreboard-server starting");
    info!(
        source = if from_file { "file" } else { "defaults" },
        ttl_seconds = config.cache.ttl_seconds,
        dragonfly_url = config.infrastructure.dragonfly_url,
        api_port = config.infrastructure.api_port,
        "Configuration loaded"
    );

    // 3. Validate before anything starts serving.
    config.validate()?;

    // 4. Connect to the score store. The connection is process-wide
    //    and reused across requests.
    let store = DragonflyStore::connect(
        &config.infrastructure.dragonfly_url,
        config.infrastructure.request_timeout(),
    )
    .await?;

    // 5. Assemble the coordinator and shared state.
    let telemetry: Arc<dyn TelemetrySink> = Arc::new(TracingSink::new());
    let coordinator =
        FetchCoordinator::new(Arc::new(store), Arc::clone(&telemetry), config.cache.ttl());
    let state = Arc::new(AppState::new(coordinator, telemetry));

    // 6. Serve.
    let server_config = ServerConfig {
        host: config.infrastructure.api_host.clone(),
        port: config.infrastructure.api_port,
    };
    start_server(&server_config, state).await?;

    info!("scoreboard-server shutdown complete");
    Ok(())
}

/// Load the service configuration from `scoreboard-config.yaml`.
///
/// Looks for the config file relative to the current working
/// directory. When absent, defaults apply with environment overrides
/// still honored. Returns whether the file was found, for logging.
fn load_config() -> Result<(ServiceConfig, bool), ConfigError> {
    let config_path = Path::new("scoreboard-config.yaml");
    if config_path.exists() {
        Ok((ServiceConfig::from_file(config_path)?, true))
    } else {
        let mut config = ServiceConfig::default();
        config.apply_env_overrides()?;
        Ok((config, false))
    }
}
