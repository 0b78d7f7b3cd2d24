//! Shared application state for the API server.
//!
//! [`AppState`] holds the two process-wide collaborators every request
//! needs: the fetch coordinator (which owns the cache slot and the
//! provider handle) and the telemetry sink. Both are created once at
//! process start and shared across requests; neither is re-created per
//! request.

use std::sync::Arc;

use scoreboard_cache::coordinator::FetchCoordinator;
use scoreboard_cache::telemetry::TelemetrySink;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// The cache/fetch decision engine.
    pub coordinator: FetchCoordinator,
    /// Sink for structured telemetry events.
    pub telemetry: Arc<dyn TelemetrySink>,
}

impl AppState {
    /// Create the application state.
    pub const fn new(coordinator: FetchCoordinator, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            coordinator,
            telemetry,
        }
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}
