//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Every request handled by the API gets a correlation identifier that
//! appears in the error response body and in every telemetry event the
//! request produces, so a client-reported failure can be matched to its
//! log lines out of band. IDs use UUID v7 (time-ordered) so sorting by
//! ID approximates sorting by arrival time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation identifier for a single inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RequestId> for Uuid {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = RequestId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
