//! HTTP endpoint handlers for the API server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/health` | Liveness probe, no coordinator dependency |
//! | `GET` | `/scores` | Full score dataset via the coordinator |
//!
//! Every invocation emits exactly one terminal telemetry event
//! (`request_success`, `request_error`, or `health_ok`); the
//! coordinator's cache hit/miss events are intermediate.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Utc;
use scoreboard_cache::telemetry::TelemetryEvent;
use scoreboard_types::RequestId;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page listing the API endpoints.
pub async fn index() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Scoreboard</title>
</head>
<body>
    <h1>Scoreboard</h1>
    <p>Model score read service.</p>
    <ul>
        <li><a href="/health">/health</a> -- liveness probe</li>
        <li><a href="/scores">/scores</a> -- full score dataset</li>
    </ul>
</body>
</html>"#,
    )
}

// ---------------------------------------------------------------------------
// GET /health -- liveness probe
// ---------------------------------------------------------------------------

/// Fixed success response while the process is live.
///
/// Never touches the coordinator or the backing store, so a provider
/// outage cannot fail a liveness check.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let started = Instant::now();
    let correlation_id = RequestId::new();

    state.telemetry.emit(TelemetryEvent::RequestReceived {
        correlation_id,
        route: String::from("/health"),
    });
    state.telemetry.emit(TelemetryEvent::HealthOk {
        correlation_id,
        total_duration: started.elapsed(),
    });

    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// GET /scores -- full score dataset
// ---------------------------------------------------------------------------

/// Return the full score dataset in provider order.
///
/// Served from the in-memory snapshot when it is fresh; otherwise the
/// coordinator refreshes it first. On provider failure the response is
/// a generic 500 carrying only the correlation token -- the provider's
/// error text is logged, not returned.
pub async fn get_scores(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();
    let correlation_id = RequestId::new();

    state.telemetry.emit(TelemetryEvent::RequestReceived {
        correlation_id,
        route: String::from("/scores"),
    });

    match state.coordinator.obtain(Utc::now()).await {
        Ok(outcome) => {
            state.telemetry.emit(TelemetryEvent::RequestSuccess {
                correlation_id,
                item_count: outcome.snapshot.records.len(),
                provenance: outcome.provenance,
                total_duration: started.elapsed(),
            });

            Ok(Json(serde_json::json!({
                "count": outcome.snapshot.records.len(),
                "models": outcome.snapshot.records,
            })))
        }
        Err(err) => {
            tracing::error!(%correlation_id, error = %err, "score fetch failed");
            state.telemetry.emit(TelemetryEvent::RequestError {
                correlation_id,
                error_kind: err.kind(),
                total_duration: started.elapsed(),
            });

            Err(ApiError::Provider { correlation_id })
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback -- unknown routes
// ---------------------------------------------------------------------------

/// Answer unknown routes with a 404 without reaching the coordinator.
pub async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> ApiError {
    let correlation_id = RequestId::new();
    state.telemetry.emit(TelemetryEvent::RequestError {
        correlation_id,
        error_kind: "route_not_found",
        total_duration: std::time::Duration::ZERO,
    });
    ApiError::NotFound(uri.path().to_owned())
}
