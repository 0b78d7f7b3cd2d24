//! Shared type definitions for the Scoreboard service.
//!
//! This crate is the single source of truth for the data model shared
//! across the Scoreboard workspace: the model score records served by
//! the API, the immutable snapshots the cache layer holds, and the
//! request correlation identifiers that tie log lines to responses.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for request correlation
//! - [`records`] -- Score records, snapshots, and serving provenance

pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use ids::RequestId;
pub use records::{ModelRecord, Provenance, ScoreSnapshot};
