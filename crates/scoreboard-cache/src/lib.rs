//! Cache/fetch decision engine for the Scoreboard service.
//!
//! The dataset behind this service (model names and their scores) is
//! small and changes slowly, so every process fronts the backing store
//! with a single in-memory snapshot bounded by a TTL. This crate is the
//! decision engine: given a request, serve the snapshot if it is still
//! fresh, otherwise fetch the full dataset once and replace the
//! snapshot wholesale.
//!
//! # Architecture
//!
//! ```text
//! Request Handler (scoreboard-api)
//!     |
//!     +-- obtain(now) --> FetchCoordinator
//!                             |-- SnapshotSlot   (process-local cache)
//!                             |-- DatasetProvider (backing store seam)
//!                             +-- TelemetrySink   (decision observability)
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Typed service configuration with fail-fast validation
//! - [`coordinator`] -- The hit/miss decision and refresh path
//! - [`provider`] -- The dataset provider seam and its error taxonomy
//! - [`slot`] -- The one-snapshot cache slot and the freshness rule
//! - [`telemetry`] -- Structured event emission for every decision

pub mod config;
pub mod coordinator;
pub mod provider;
pub mod slot;
pub mod telemetry;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServiceConfig};
pub use coordinator::{FetchCoordinator, FetchOutcome};
pub use provider::{DatasetProvider, ProviderError, StaticProvider};
pub use slot::{SnapshotSlot, is_fresh};
pub use telemetry::{CollectingSink, NoOpSink, TelemetryEvent, TelemetrySink, TracingSink};
