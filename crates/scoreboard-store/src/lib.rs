//! Dragonfly-backed dataset provider for the Scoreboard service.
//!
//! The score dataset lives in a Dragonfly (Redis-compatible) instance
//! as a list of JSON-encoded records under one key. This crate provides
//! [`DragonflyStore`], the production implementation of the
//! [`DatasetProvider`](scoreboard_cache::DatasetProvider) seam, plus
//! the write path used by the seed binary.
//!
//! # Modules
//!
//! - [`dragonfly`] -- Connection handling and typed list operations
//! - [`error`] -- Startup and write-path error types

pub mod dragonfly;
pub mod error;

// Re-export primary types for convenience.
pub use dragonfly::{DragonflyStore, MODELS_KEY};
pub use error::StoreError;
