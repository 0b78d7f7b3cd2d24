//! API server for the Scoreboard service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /health`** -- liveness probe; fixed success response with no
//!   dependency on the cache or the backing store
//! - **`GET /scores`** -- the full model score dataset, served through
//!   the [`FetchCoordinator`](scoreboard_cache::FetchCoordinator)
//! - **`GET /`** -- minimal HTML status page listing the endpoints
//!
//! # Architecture
//!
//! Handlers translate an inbound request into a dispatch decision,
//! invoke the coordinator on the data route, and map the outcome to a
//! response plus structured telemetry. Provider failures surface as a
//! generic 500 carrying a correlation token; the raw provider error
//! goes to the logs only, never to the response body.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
