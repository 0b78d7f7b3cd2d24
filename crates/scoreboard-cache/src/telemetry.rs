//! Structured event emission for every cache decision.
//!
//! The surrounding platform's telemetry pipeline is an external
//! collaborator; the core only needs a sink that accepts a named event
//! with typed fields. [`TracingSink`] is the production emitter (one
//! structured `tracing` line per event); [`CollectingSink`] records
//! events for assertions; [`NoOpSink`] discards them.
//!
//! Every request produces exactly one terminal event
//! ([`TelemetryEvent::RequestSuccess`] or
//! [`TelemetryEvent::RequestError`]); the cache hit/miss events are
//! intermediate and come from the coordinator.

use std::sync::Mutex;
use std::time::Duration;

use scoreboard_types::{Provenance, RequestId};
use tracing::info;

/// A structured telemetry event.
///
/// Wall-clock durations (`total_duration`, `fetch_duration`) are
/// measured monotonically; the snapshot `age` is in the same wall-clock
/// domain as the freshness rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// An inbound request was received and routed.
    RequestReceived {
        /// Correlation token carried through the request's events.
        correlation_id: RequestId,
        /// The matched route, e.g. `/scores`.
        route: String,
    },

    /// The coordinator served the in-memory snapshot.
    CacheHit {
        /// Snapshot age at the moment of serving.
        age: chrono::Duration,
    },

    /// The coordinator fetched and replaced the snapshot.
    CacheMissRefreshed {
        /// Number of records in the fresh snapshot.
        item_count: usize,
        /// How long the provider fetch took.
        fetch_duration: Duration,
    },

    /// Terminal event for a successfully answered data request.
    RequestSuccess {
        /// Correlation token carried through the request's events.
        correlation_id: RequestId,
        /// Number of records returned.
        item_count: usize,
        /// Whether the response came from cache or a fresh fetch.
        provenance: Provenance,
        /// Total request processing time.
        total_duration: Duration,
    },

    /// Terminal event for a failed data request.
    RequestError {
        /// Correlation token carried through the request's events.
        correlation_id: RequestId,
        /// Provider error category (`unreachable`, `timeout`, ...).
        error_kind: &'static str,
        /// Total request processing time.
        total_duration: Duration,
    },

    /// Terminal event for a liveness check.
    HealthOk {
        /// Correlation token carried through the request's events.
        correlation_id: RequestId,
        /// Total request processing time.
        total_duration: Duration,
    },
}

impl TelemetryEvent {
    /// The event's name as it appears in emitted log lines.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RequestReceived { .. } => "request_received",
            Self::CacheHit { .. } => "cache_hit",
            Self::CacheMissRefreshed { .. } => "cache_miss_refreshed",
            Self::RequestSuccess { .. } => "request_success",
            Self::RequestError { .. } => "request_error",
            Self::HealthOk { .. } => "health_ok",
        }
    }
}

/// Accepts telemetry events.
///
/// Implementations must be internally synchronized; one sink instance
/// is shared across all requests in the process.
pub trait TelemetrySink: Send + Sync {
    /// Emit one event.
    fn emit(&self, event: TelemetryEvent);
}

/// Production sink: one structured `tracing` line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing-backed sink.
    pub const fn new() -> Self {
        Self
    }
}

impl TelemetrySink for TracingSink {
    fn emit(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::RequestReceived {
                correlation_id,
                route,
            } => {
                info!(event = "request_received", %correlation_id, route, "request received");
            }
            TelemetryEvent::CacheHit { age } => {
                info!(
                    event = "cache_hit",
                    age_ms = age.num_milliseconds(),
                    "serving cached snapshot"
                );
            }
            TelemetryEvent::CacheMissRefreshed {
                item_count,
                fetch_duration,
            } => {
                info!(
                    event = "cache_miss_refreshed",
                    item_count,
                    fetch_duration_ms = millis(fetch_duration),
                    "snapshot refreshed from provider"
                );
            }
            TelemetryEvent::RequestSuccess {
                correlation_id,
                item_count,
                provenance,
                total_duration,
            } => {
                info!(
                    event = "request_success",
                    %correlation_id,
                    item_count,
                    provenance = provenance.as_str(),
                    total_duration_ms = millis(total_duration),
                    "request completed"
                );
            }
            TelemetryEvent::RequestError {
                correlation_id,
                error_kind,
                total_duration,
            } => {
                info!(
                    event = "request_error",
                    %correlation_id,
                    error_kind,
                    total_duration_ms = millis(total_duration),
                    "request failed"
                );
            }
            TelemetryEvent::HealthOk {
                correlation_id,
                total_duration,
            } => {
                info!(
                    event = "health_ok",
                    %correlation_id,
                    total_duration_ms = millis(total_duration),
                    "health check answered"
                );
            }
        }
    }
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl TelemetrySink for NoOpSink {
    fn emit(&self, _event: TelemetryEvent) {}
}

/// A sink that records every event, for assertions in tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, in emission order.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Names of all events emitted so far, in emission order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(TelemetryEvent::name)
            .collect()
    }
}

impl TelemetrySink for CollectingSink {
    fn emit(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Duration in whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
