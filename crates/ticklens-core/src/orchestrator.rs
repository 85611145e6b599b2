//! The tick orchestrator: fixed-order collection, failure isolation,
//! timing, validation, and shutdown.
//!
//! One orchestrator exists per session. Each tick it invokes the seven
//! domain collectors exactly once, in a fixed order (player, world,
//! input, combat, social, interface, system), wrapping every call in a
//! failure boundary: a failed collector is logged and its sub-record
//! left empty, and the tick proceeds. The assembled snapshot is
//! validated and timed; nothing in this path may propagate a failure
//! to the host.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use ticklens_host::{HostState, InputCounters};
use ticklens_types::records::AnalysisRecord;
use ticklens_types::snapshot::TickSnapshot;

use crate::collectors::input::InputCollector;
use crate::collectors::system::TimingState;
use crate::collectors::{CollectError, combat, interface, player, social, system, world};
use crate::config::TelemetryConfig;
use crate::session::SessionContext;

/// Number of domain collectors the orchestrator runs per tick.
const DOMAIN_COUNT: u32 = 7;

/// Errors surfaced by the orchestrator itself.
///
/// There is deliberately no "fatal" collection error: every collector
/// failure is absorbed at the boundary. The only fail-fast path is a
/// snapshot requested after shutdown.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// `build_snapshot` was called after `shutdown`.
    #[error("orchestrator is shut down; no further snapshots will be built")]
    ShutDown,
}

/// Per-session tick orchestrator.
///
/// Owns the cross-tick collector state (movement/mouse cursors, timing
/// totals) and shares the [`SessionContext`] with the host callbacks.
/// Must only be driven from the tick thread.
#[derive(Debug)]
pub struct Orchestrator {
    session: Arc<SessionContext>,
    config: TelemetryConfig,
    input: InputCollector,
    timing: TimingState,
    shut_down: AtomicBool,
}

impl Orchestrator {
    /// Create an orchestrator for a session.
    pub fn new(session: Arc<SessionContext>, config: TelemetryConfig) -> Self {
        Self {
            session,
            config,
            input: InputCollector::new(),
            timing: TimingState::default(),
            shut_down: AtomicBool::new(false),
        }
    }

    /// The session context this orchestrator drains.
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Build the snapshot for one tick.
    ///
    /// Invokes every enabled collector once, in the fixed order, each
    /// behind the failure boundary. The returned snapshot always has
    /// its mandatory fields populated; individual sub-records are
    /// `None` where their collector failed or is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ShutDown`] after [`shutdown`] has
    /// been called; partial data is never silently returned.
    ///
    /// [`shutdown`]: Orchestrator::shutdown
    pub fn build_snapshot(
        &mut self,
        host: &dyn HostState,
        counters: &dyn InputCounters,
        tick_number: u64,
    ) -> Result<TickSnapshot, OrchestratorError> {
        if self.shut_down.load(Ordering::Acquire) {
            warn!(tick_number, "snapshot requested after shutdown");
            return Err(OrchestratorError::ShutDown);
        }

        let started = Instant::now();
        let now = Utc::now();
        let toggles = self.config.collectors.clone();

        // Depths before any collector drains, for the system record.
        let chat_depth = self.session.chat_depth();
        let inventory_depth = self.session.inventory_depth();

        let player = toggles
            .player
            .then(|| boundary("player", player::collect(host)))
            .flatten();
        let world = toggles
            .world
            .then(|| boundary("world", world::collect(host)))
            .flatten();
        let input = if toggles.input {
            boundary(
                "input",
                self.input.collect(host, counters, &self.session, now),
            )
        } else {
            None
        };
        let combat = toggles
            .combat
            .then(|| boundary("combat", combat::collect(host, &self.session)))
            .flatten();
        let social = toggles
            .social
            .then(|| {
                boundary(
                    "social",
                    social::collect(host, &self.session, self.config.chat.window_ms, now),
                )
            })
            .flatten();
        let interface = toggles
            .interface
            .then(|| boundary("interface", interface::collect(host, &self.session)))
            .flatten();
        let system = toggles
            .system
            .then(|| {
                boundary(
                    "system",
                    system::collect(self.timing, chat_depth, inventory_depth),
                )
            })
            .flatten();

        let elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        // A degraded tick still needs a positive duration to validate.
        let processing_duration_nanos = elapsed.max(1);

        let mut snapshot = TickSnapshot {
            session_id: self.session.session_id(),
            tick_number,
            timestamp: now,
            processing_duration_nanos,
            player,
            world,
            input,
            combat,
            social,
            interface,
            system,
            analysis: None,
        };

        let populated = snapshot.populated_domain_count();
        snapshot.analysis = Some(AnalysisRecord {
            populated_domains: populated,
            total_domains: DOMAIN_COUNT,
            completeness: f64::from(populated) / f64::from(DOMAIN_COUNT),
        });

        if snapshot.is_valid() {
            debug!(
                tick_number,
                populated,
                duration_nanos = processing_duration_nanos,
                data_points = snapshot.data_point_count(),
                "snapshot assembled"
            );
        } else {
            // Downstream persistence rejects or flags it; the tick
            // itself does not fail.
            error!(
                tick_number,
                duration_nanos = processing_duration_nanos,
                "snapshot failed validation"
            );
        }

        self.timing.record(processing_duration_nanos);

        Ok(snapshot)
    }

    /// Transition to the terminal state. Idempotent; after the first
    /// call every `build_snapshot` fails fast with
    /// [`OrchestratorError::ShutDown`].
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::AcqRel) {
            info!(
                ticks_processed = self.timing.ticks_processed,
                "orchestrator shut down"
            );
        }
    }

    /// Whether [`shutdown`] has been called.
    ///
    /// [`shutdown`]: Orchestrator::shutdown
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

/// The per-collector failure boundary: log and degrade to a missing
/// sub-record, never abort the tick.
fn boundary<T>(domain: &'static str, result: Result<T, CollectError>) -> Option<T> {
    match result {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(domain, error = %err, "collector failed; sub-record left empty");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_host::{LocalActor, StubHost};
    use ticklens_types::ids::SessionId;
    use ticklens_types::point::TilePoint;

    use super::*;

    fn orchestrator_with(config: TelemetryConfig) -> Orchestrator {
        let session = Arc::new(SessionContext::new(
            SessionId::new(),
            &config.queues,
            Utc::now(),
        ));
        Orchestrator::new(session, config)
    }

    fn logged_in_host() -> StubHost {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            name: Some(String::from("Alice")),
            position: Some(TilePoint::new(3200, 3200, 0)),
            ..LocalActor::default()
        });
        host
    }

    #[test]
    fn snapshot_has_all_domains_when_host_is_healthy() {
        let mut orchestrator = orchestrator_with(TelemetryConfig::default());
        let host = logged_in_host();

        let snapshot = orchestrator.build_snapshot(&host, &host, 1).unwrap();
        assert!(snapshot.is_valid());
        assert_eq!(snapshot.populated_domain_count(), 7);
        let analysis = snapshot.analysis.unwrap();
        assert_eq!(analysis.populated_domains, 7);
        assert!((analysis.completeness - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failing_collectors_degrade_but_snapshot_stays_valid() {
        let mut orchestrator = orchestrator_with(TelemetryConfig::default());
        // Logged out: player and world collectors fail.
        let host = StubHost::new();

        let snapshot = orchestrator.build_snapshot(&host, &host, 1).unwrap();
        assert!(snapshot.is_valid());
        assert!(snapshot.player.is_none());
        assert!(snapshot.world.is_none());
        assert!(snapshot.input.is_some());
        assert!(snapshot.social.is_some());
        assert_eq!(snapshot.populated_domain_count(), 5);
    }

    #[test]
    fn disabled_collector_is_skipped() {
        let mut config = TelemetryConfig::default();
        config.collectors.combat = false;
        let mut orchestrator = orchestrator_with(config);
        let host = logged_in_host();

        let snapshot = orchestrator.build_snapshot(&host, &host, 1).unwrap();
        assert!(snapshot.combat.is_none());
        assert!(snapshot.is_valid());
    }

    #[test]
    fn shutdown_fails_fast_and_is_idempotent() {
        let mut orchestrator = orchestrator_with(TelemetryConfig::default());
        let host = logged_in_host();

        assert!(orchestrator.build_snapshot(&host, &host, 1).is_ok());
        orchestrator.shutdown();
        orchestrator.shutdown();
        assert!(orchestrator.is_shut_down());
        assert!(matches!(
            orchestrator.build_snapshot(&host, &host, 2),
            Err(OrchestratorError::ShutDown)
        ));
    }

    #[test]
    fn duration_is_always_positive() {
        let mut orchestrator = orchestrator_with(TelemetryConfig::default());
        let host = logged_in_host();
        let snapshot = orchestrator.build_snapshot(&host, &host, 1).unwrap();
        assert!(snapshot.processing_duration_nanos > 0);
    }

    #[test]
    fn system_record_sees_pre_drain_depths() {
        let mut orchestrator = orchestrator_with(TelemetryConfig::default());
        let host = logged_in_host();
        orchestrator.session().record_chat(ticklens_types::events::ChatEvent {
            category: ticklens_types::enums::ChatCategory::Public,
            sender: None,
            text: String::from("hi"),
            received_at: Utc::now(),
        });

        let snapshot = orchestrator.build_snapshot(&host, &host, 1).unwrap();
        let sys = snapshot.system.unwrap();
        assert_eq!(sys.chat_queue_depth, 1);
        // Social drained it during the same tick.
        let social = snapshot.social.unwrap();
        assert_eq!(social.total_message_count, 1);
    }
}
