//! The outbound snapshot seam.
//!
//! Persistence is an external collaborator; the engine only hands each
//! finished snapshot across this trait. The bundled [`LogSink`] logs a
//! one-line summary per snapshot, which is enough to watch a live
//! session without any storage backend.

use tracing::{info, warn};

use ticklens_types::snapshot::TickSnapshot;

/// Consumer of finished tick snapshots.
///
/// Called on the tick thread after validation; implementations must
/// not block the tick loop for longer than a tick interval.
pub trait SnapshotSink {
    /// Accept one finished snapshot.
    fn accept(&mut self, snapshot: &TickSnapshot);
}

/// A sink that logs snapshot summaries instead of persisting them.
#[derive(Debug, Default)]
pub struct LogSink {
    invalid_seen: u64,
}

impl LogSink {
    /// Create a log-only sink.
    pub const fn new() -> Self {
        Self { invalid_seen: 0 }
    }

    /// Number of invalid snapshots this sink has flagged.
    pub const fn invalid_seen(&self) -> u64 {
        self.invalid_seen
    }
}

impl SnapshotSink for LogSink {
    fn accept(&mut self, snapshot: &TickSnapshot) {
        if snapshot.is_valid() {
            info!(
                tick = snapshot.tick_number,
                data_points = snapshot.data_point_count(),
                populated = snapshot.populated_domain_count(),
                duration_us = snapshot.processing_duration_nanos / 1_000,
                "snapshot"
            );
        } else {
            self.invalid_seen = self.invalid_seen.saturating_add(1);
            warn!(
                tick = snapshot.tick_number,
                invalid_total = self.invalid_seen,
                "rejecting invalid snapshot"
            );
        }
    }
}
