//! Seed the score store with the starter dataset.
//!
//! Connects to the configured Dragonfly instance and replaces the
//! stored dataset with the four starter records. Run once after the
//! store comes up:
//!
//! ```bash
//! cargo run --bin scoreboard-seed
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use scoreboard_cache::config::{ConfigError, ServiceConfig};
use scoreboard_store::DragonflyStore;
use scoreboard_types::ModelRecord;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The starter dataset written by the seeder.
fn starter_records() -> Vec<ModelRecord> {
    vec![
        ModelRecord {
            model_name: String::from("GPT-4"),
            provider: String::from("OpenAI"),
            context_window: 128_000,
            score: Decimal::new(955, 1),
        },
        ModelRecord {
            model_name: String::from("Claude 3 Opus"),
            provider: String::from("Anthropic"),
            context_window: 200_000,
            score: Decimal::new(960, 1),
        },
        ModelRecord {
            model_name: String::from("Llama 3 70B"),
            provider: String::from("Meta"),
            context_window: 8192,
            score: Decimal::new(895, 1),
        },
        ModelRecord {
            model_name: String::from("Gemini 1.5 Pro"),
            provider: String::from("Google"),
            context_window: 1_000_000,
            score: Decimal::new(948, 1),
        },
    ]
}

/// Entry point for the seeder.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let url = &config.infrastructure.dragonfly_url;
    info!(url, "Seeding score dataset");

    let store = DragonflyStore::connect(url, None).await?;

    let records = starter_records();
    for record in &records {
        info!(
            model_name = record.model_name,
            provider = record.provider,
            score = %record.score,
            "Adding record"
        );
    }
    store.replace_all(&records).await?;

    info!(count = records.len(), "Seeding complete");
    Ok(())
}

/// Load the service configuration from `scoreboard-config.yaml`,
/// falling back to defaults (with environment overrides) when absent.
fn load_config() -> Result<ServiceConfig, ConfigError> {
    let config_path = Path::new("scoreboard-config.yaml");
    if config_path.exists() {
        ServiceConfig::from_file(config_path)
    } else {
        let mut config = ServiceConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}
