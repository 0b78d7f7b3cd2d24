//! Axum router construction for the API server.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the API server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /health` -- liveness probe
/// - `GET /scores` -- full score dataset
///
/// Unknown routes fall through to a 404 handler that never touches the
/// coordinator. CORS is configured to allow any origin for
/// development. In production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/scores", get(handlers::get_scores))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
