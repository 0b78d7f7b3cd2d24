//! The hit/miss decision and refresh path.
//!
//! [`FetchCoordinator::obtain`] is the only entry point the request
//! handler uses: it either serves the process-local snapshot (the
//! dominant, latency-critical path -- no I/O, one `Arc` clone) or
//! refreshes it from the [`DatasetProvider`] and replaces the slot
//! wholesale. Provider failures propagate unchanged and never evict a
//! stale snapshot; the next call retries from the same state.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use scoreboard_types::{Provenance, ScoreSnapshot};

use crate::provider::{DatasetProvider, ProviderError};
use crate::slot::{SnapshotSlot, is_fresh};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// The served snapshot tagged with how it was obtained.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The snapshot that answers the request.
    pub snapshot: Arc<ScoreSnapshot>,
    /// Whether the snapshot came from cache or a fresh fetch.
    pub provenance: Provenance,
    /// The snapshot's age at the moment of serving (zero on a refresh).
    pub age: Duration,
}

/// The decision engine: one slot, one provider, one TTL.
///
/// Constructed once per process at startup and shared across requests
/// behind an [`Arc`]; all interior state is the slot's, which is safe
/// under concurrent use.
pub struct FetchCoordinator {
    slot: SnapshotSlot,
    provider: Arc<dyn DatasetProvider>,
    telemetry: Arc<dyn TelemetrySink>,
    ttl: Duration,
}

impl FetchCoordinator {
    /// Create a coordinator with an empty slot.
    ///
    /// `ttl` must be non-negative; configuration validation
    /// ([`ServiceConfig::validate`](crate::config::ServiceConfig::validate))
    /// enforces this before a coordinator is ever built. A zero TTL
    /// disables caching: every call is a miss.
    pub fn new(
        provider: Arc<dyn DatasetProvider>,
        telemetry: Arc<dyn TelemetrySink>,
        ttl: Duration,
    ) -> Self {
        Self {
            slot: SnapshotSlot::new(),
            provider,
            telemetry,
            ttl,
        }
    }

    /// Serve a snapshot, from cache if fresh, otherwise via the provider.
    ///
    /// `now` is captured once by the caller and used for both the
    /// freshness comparison and the new snapshot's capture time, so the
    /// TTL boundary cannot move mid-decision.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the slot is empty or stale and the
    /// provider fetch fails. The slot is left exactly as it was: an
    /// existing stale snapshot stays present, an empty slot stays empty.
    pub async fn obtain(&self, now: DateTime<Utc>) -> Result<FetchOutcome, ProviderError> {
        if let Some(current) = self.slot.current().await
            && is_fresh(&current, now, self.ttl)
        {
            let age = current.age(now);
            self.telemetry.emit(TelemetryEvent::CacheHit { age });
            return Ok(FetchOutcome {
                snapshot: current,
                provenance: Provenance::CacheHit,
                age,
            });
        }

        let started = Instant::now();
        let records = self.provider.fetch_all().await?;
        let fetch_duration = started.elapsed();

        let snapshot = self.slot.replace(records, now).await;
        self.telemetry.emit(TelemetryEvent::CacheMissRefreshed {
            item_count: snapshot.records.len(),
            fetch_duration,
        });

        Ok(FetchOutcome {
            snapshot,
            provenance: Provenance::CacheMissRefreshed,
            age: Duration::zero(),
        })
    }

    /// The slot this coordinator owns. Exposed for state inspection.
    pub const fn slot(&self) -> &SnapshotSlot {
        &self.slot
    }

    /// The configured freshness window.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl core::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("slot", &self.slot)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use scoreboard_types::ModelRecord;

    use super::*;
    use crate::telemetry::CollectingSink;

    /// Scripted provider: pops one canned response per call and counts
    /// invocations.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<Vec<ModelRecord>, ProviderError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<Vec<ModelRecord>, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DatasetProvider for ScriptedProvider {
        async fn fetch_all(&self) -> Result<Vec<ModelRecord>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(ProviderError::Unreachable {
                        message: String::from("script exhausted"),
                    })
                })
        }
    }

    fn record(name: &str, score: Decimal) -> ModelRecord {
        ModelRecord {
            model_name: name.to_owned(),
            provider: String::from("Test Lab"),
            context_window: 8192,
            score,
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn coordinator(
        provider: Arc<ScriptedProvider>,
        ttl_seconds: i64,
    ) -> (FetchCoordinator, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        let coordinator = FetchCoordinator::new(
            provider,
            Arc::clone(&sink) as Arc<dyn TelemetrySink>,
            Duration::seconds(ttl_seconds),
        );
        (coordinator, sink)
    }

    #[tokio::test]
    async fn first_call_fetches_and_populates() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(vec![record(
            "gpt-x",
            Decimal::new(9, 1),
        )])]));
        let (coordinator, sink) = coordinator(Arc::clone(&provider), 300);

        let outcome = coordinator.obtain(at(0)).await.unwrap();
        assert_eq!(outcome.provenance, Provenance::CacheMissRefreshed);
        assert_eq!(outcome.snapshot.generation, 1);
        assert_eq!(outcome.age, Duration::zero());
        assert_eq!(provider.calls(), 1);
        assert_eq!(sink.names(), vec!["cache_miss_refreshed"]);
    }

    #[tokio::test]
    async fn calls_within_the_ttl_window_hit_without_io() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(vec![record(
            "gpt-x",
            Decimal::new(9, 1),
        )])]));
        let (coordinator, sink) = coordinator(Arc::clone(&provider), 300);

        coordinator.obtain(at(0)).await.unwrap();
        for now in [1, 10, 150, 299] {
            let outcome = coordinator.obtain(at(now)).await.unwrap();
            assert_eq!(outcome.provenance, Provenance::CacheHit);
            assert_eq!(outcome.snapshot.generation, 1);
            assert_eq!(outcome.age, Duration::seconds(now));
        }
        // Only the initial miss reached the provider.
        assert_eq!(provider.calls(), 1);
        assert_eq!(
            sink.names(),
            vec![
                "cache_miss_refreshed",
                "cache_hit",
                "cache_hit",
                "cache_hit",
                "cache_hit"
            ]
        );
    }

    #[tokio::test]
    async fn refresh_at_the_ttl_boundary_updates_the_record() {
        // Scenario: fetch at t=0 serves score 0.9; at t=301 the provider
        // answers 0.95 and the refreshed snapshot carries the new value.
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
            Ok(vec![record("gpt-x", Decimal::new(95, 2))]),
        ]));
        let (coordinator, _sink) = coordinator(Arc::clone(&provider), 300);

        coordinator.obtain(at(0)).await.unwrap();
        let hit = coordinator.obtain(at(10)).await.unwrap();
        assert_eq!(hit.provenance, Provenance::CacheHit);
        assert_eq!(
            hit.snapshot.records.first().map(|r| r.score),
            Some(Decimal::new(9, 1))
        );

        let refreshed = coordinator.obtain(at(301)).await.unwrap();
        assert_eq!(refreshed.provenance, Provenance::CacheMissRefreshed);
        assert_eq!(refreshed.snapshot.generation, 2);
        assert_eq!(
            refreshed.snapshot.records.first().map(|r| r.score),
            Some(Decimal::new(95, 2))
        );
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
        ]));
        let (coordinator, _sink) = coordinator(Arc::clone(&provider), 0);

        for (call, now) in [0, 0, 1].into_iter().enumerate() {
            let outcome = coordinator.obtain(at(now)).await.unwrap();
            assert_eq!(outcome.provenance, Provenance::CacheMissRefreshed);
            assert_eq!(outcome.snapshot.generation, u64::try_from(call).unwrap().saturating_add(1));
        }
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn failure_with_empty_slot_leaves_it_empty() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(ProviderError::Unreachable {
                message: String::from("connection refused"),
            }),
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
        ]));
        let (coordinator, sink) = coordinator(Arc::clone(&provider), 300);

        let err = coordinator.obtain(at(0)).await.unwrap_err();
        assert_eq!(err.kind(), "unreachable");
        assert!(coordinator.slot().current().await.is_none());
        assert!(sink.events().is_empty());

        // The next call behaves identically to a first call.
        let outcome = coordinator.obtain(at(1)).await.unwrap();
        assert_eq!(outcome.provenance, Provenance::CacheMissRefreshed);
        assert_eq!(outcome.snapshot.generation, 1);
    }

    #[tokio::test]
    async fn failure_with_stale_slot_preserves_the_old_snapshot() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(vec![record("gpt-x", Decimal::new(9, 1))]),
            Err(ProviderError::Timeout { deadline_ms: 5000 }),
            Ok(vec![record("gpt-x", Decimal::new(95, 2))]),
        ]));
        let (coordinator, _sink) = coordinator(Arc::clone(&provider), 300);

        coordinator.obtain(at(0)).await.unwrap();

        // Stale refresh fails; the t=0 snapshot must remain untouched.
        let err = coordinator.obtain(at(301)).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
        let kept = coordinator.slot().current().await.unwrap();
        assert_eq!(kept.generation, 1);
        assert_eq!(kept.captured_at, at(0));

        // A later successful refresh finally advances the generation.
        let refreshed = coordinator.obtain(at(302)).await.unwrap();
        assert_eq!(refreshed.snapshot.generation, 2);
    }

    #[tokio::test]
    async fn cache_hits_preserve_provider_order() {
        let fetched = vec![
            record("llama-3-70b", Decimal::new(895, 1)),
            record("gpt-4", Decimal::new(955, 1)),
            record("claude-3-opus", Decimal::new(960, 1)),
        ];
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(fetched.clone())]));
        let (coordinator, _sink) = coordinator(provider, 300);

        coordinator.obtain(at(0)).await.unwrap();
        let hit = coordinator.obtain(at(10)).await.unwrap();
        assert_eq!(hit.snapshot.records, fetched);
    }

    #[tokio::test]
    async fn generations_never_decrease_across_refreshes() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(Vec::new()),
            Ok(Vec::new()),
            Ok(Vec::new()),
        ]));
        let (coordinator, _sink) = coordinator(provider, 0);

        let mut last = 0;
        for now in 0..3 {
            let outcome = coordinator.obtain(at(now)).await.unwrap();
            assert!(outcome.snapshot.generation > last);
            last = outcome.snapshot.generation;
        }
    }
}
