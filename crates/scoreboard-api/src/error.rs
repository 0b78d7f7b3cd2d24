//! Error types for the API layer.
//!
//! [`ApiError`] unifies the failure modes that cross the HTTP boundary
//! into a single enum converted via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. The
//! provider variant deliberately carries only a correlation token: the
//! backing store's error text stays in the logs and never reaches a
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scoreboard_types::RequestId;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested route does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The dataset provider failed; details are in the logs under the
    /// correlation token.
    #[error("provider failure, correlation {correlation_id}")]
    Provider {
        /// Token linking the response to its log lines.
        correlation_id: RequestId,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(path) => {
                let body = serde_json::json!({
                    "error": format!("not found: {path}"),
                    "status": StatusCode::NOT_FOUND.as_u16(),
                });
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }
            Self::Provider { correlation_id } => {
                let body = serde_json::json!({
                    "error": "internal error",
                    "correlation_id": correlation_id,
                    "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}
