//! Integration tests for the Dragonfly score store.
//!
//! These tests require a live Dragonfly (or Redis) instance. Run with:
//!
//! ```bash
//! docker compose up -d
//! cargo test -p scoreboard-store -- --ignored
//! docker compose down
//! ```
//!
//! All tests are marked `#[ignore]` so they are skipped during normal
//! `cargo test` runs.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing
)]

use fred::prelude::*;
use rust_decimal::Decimal;
use scoreboard_cache::provider::DatasetProvider;
use scoreboard_store::{DragonflyStore, MODELS_KEY};
use scoreboard_types::ModelRecord;

/// Dragonfly connection URL for the local Docker instance.
const DRAGONFLY_URL: &str = "redis://localhost:6379";

async fn setup_store() -> DragonflyStore {
    let store = DragonflyStore::connect(DRAGONFLY_URL, None)
        .await
        .expect("Failed to connect to Dragonfly -- is Docker running?");
    let _: u32 = store
        .client()
        .del(MODELS_KEY)
        .await
        .expect("Failed to clear the models key");
    store
}

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
    ]
}

#[tokio::test]
#[ignore]
async fn replace_then_fetch_preserves_order_and_values() {
    let store = setup_store().await;
    let records = starter_records();

    store.replace_all(&records).await.expect("replace_all failed");

    let fetched = store.fetch_all().await.expect("fetch_all failed");
    assert_eq!(fetched, records);
}

#[tokio::test]
#[ignore]
async fn fetch_from_a_missing_key_yields_an_empty_dataset() {
    let store = setup_store().await;

    let fetched = store.fetch_all().await.expect("fetch_all failed");
    assert!(fetched.is_empty());
}

#[tokio::test]
#[ignore]
async fn replace_overwrites_the_previous_dataset() {
    let store = setup_store().await;

    store
        .replace_all(&starter_records())
        .await
        .expect("first replace failed");

    let smaller = vec![ModelRecord {
        model_name: String::from("Gemini 1.5 Pro"),
        provider: String::from("Google"),
        context_window: 1_000_000,
        score: Decimal::new(948, 1),
    }];
    store
        .replace_all(&smaller)
        .await
        .expect("second replace failed");

    let fetched = store.fetch_all().await.expect("fetch_all failed");
    assert_eq!(fetched, smaller);
}

#[tokio::test]
#[ignore]
async fn a_malformed_list_element_is_a_malformed_provider_error() {
    let store = setup_store().await;

    let _: u64 = store
        .client()
        .rpush(MODELS_KEY, "not json at all")
        .await
        .expect("rpush failed");

    let err = store.fetch_all().await.expect_err("fetch should fail");
    assert_eq!(err.kind(), "malformed");
}
