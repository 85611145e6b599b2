//! The per-tick aggregate snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::SessionId;
use crate::records::{
    AnalysisRecord, CombatRecord, InputRecord, InterfaceRecord, PlayerRecord, SocialRecord,
    SystemRecord, WorldRecord,
};

/// One complete, validated telemetry record for a single tick.
///
/// Keyed by `(session_id, tick_number)` and immutable after the
/// orchestrator finalizes it. The four mandatory fields plus a positive
/// processing duration decide validity; the optional sub-records never
/// do -- a `None` there means the corresponding collector failed in
/// isolation this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Session this snapshot belongs to.
    pub session_id: SessionId,
    /// Strictly increasing tick counter within the session.
    pub tick_number: u64,
    /// Wall-clock time at capture.
    pub timestamp: DateTime<Utc>,
    /// Time the orchestrator spent assembling this snapshot, > 0.
    pub processing_duration_nanos: u64,
    /// Local-actor domain record.
    pub player: Option<PlayerRecord>,
    /// Scene/environment domain record.
    pub world: Option<WorldRecord>,
    /// Input domain record.
    pub input: Option<InputRecord>,
    /// Combat domain record.
    pub combat: Option<CombatRecord>,
    /// Chat/trade domain record.
    pub social: Option<SocialRecord>,
    /// UI-interface domain record.
    pub interface: Option<InterfaceRecord>,
    /// Engine-metrics domain record.
    pub system: Option<SystemRecord>,
    /// Completeness summary added by the orchestrator after collection.
    pub analysis: Option<AnalysisRecord>,
}

impl TickSnapshot {
    /// Whether the mandatory fields are all present and coherent.
    ///
    /// Holds iff the processing duration is positive; the identifier,
    /// tick number, and timestamp fields are unconditionally present by
    /// construction in Rust, so the duration is the only runtime check.
    /// Optional sub-records are never part of validity.
    pub const fn is_valid(&self) -> bool {
        self.processing_duration_nanos > 0
    }

    /// Total data points across the mandatory fields and whatever
    /// sub-records are present. Computed on demand, never cached.
    pub fn data_point_count(&self) -> usize {
        let mut count = 4_usize; // session, tick, timestamp, duration
        count = count.saturating_add(self.player.as_ref().map_or(0, PlayerRecord::data_point_count));
        count = count.saturating_add(self.world.as_ref().map_or(0, WorldRecord::data_point_count));
        count = count.saturating_add(self.input.as_ref().map_or(0, InputRecord::data_point_count));
        count = count.saturating_add(self.combat.as_ref().map_or(0, CombatRecord::data_point_count));
        count = count.saturating_add(self.social.as_ref().map_or(0, SocialRecord::data_point_count));
        count = count
            .saturating_add(self.interface.as_ref().map_or(0, InterfaceRecord::data_point_count));
        count = count.saturating_add(self.system.as_ref().map_or(0, SystemRecord::data_point_count));
        count = count
            .saturating_add(self.analysis.as_ref().map_or(0, AnalysisRecord::data_point_count));
        count
    }

    /// Rough heap footprint of this snapshot in bytes, from whatever
    /// sub-records are present. Computed on demand, never cached.
    pub fn estimated_memory_bytes(&self) -> usize {
        let mut bytes = 96_usize; // struct shell + mandatory fields
        bytes = bytes.saturating_add(self.player.as_ref().map_or(0, PlayerRecord::estimated_bytes));
        bytes = bytes.saturating_add(self.world.as_ref().map_or(0, WorldRecord::estimated_bytes));
        bytes = bytes.saturating_add(self.input.as_ref().map_or(0, InputRecord::estimated_bytes));
        bytes = bytes.saturating_add(self.combat.as_ref().map_or(0, CombatRecord::estimated_bytes));
        bytes = bytes.saturating_add(self.social.as_ref().map_or(0, SocialRecord::estimated_bytes));
        bytes = bytes
            .saturating_add(self.interface.as_ref().map_or(0, InterfaceRecord::estimated_bytes));
        bytes = bytes.saturating_add(self.system.as_ref().map_or(0, SystemRecord::estimated_bytes));
        bytes
    }

    /// Number of domain sub-records present.
    pub fn populated_domain_count(&self) -> u32 {
        let mut populated = 0_u32;
        if self.player.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.world.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.input.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.combat.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.social.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.interface.is_some() {
            populated = populated.saturating_add(1);
        }
        if self.system.is_some() {
            populated = populated.saturating_add(1);
        }
        populated
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bare_snapshot(duration_nanos: u64) -> TickSnapshot {
        TickSnapshot {
            session_id: SessionId::new(),
            tick_number: 1,
            timestamp: Utc::now(),
            processing_duration_nanos: duration_nanos,
            player: None,
            world: None,
            input: None,
            combat: None,
            social: None,
            interface: None,
            system: None,
            analysis: None,
        }
    }

    #[test]
    fn validity_requires_positive_duration() {
        assert!(bare_snapshot(1).is_valid());
        assert!(!bare_snapshot(0).is_valid());
    }

    #[test]
    fn missing_sub_records_do_not_invalidate() {
        let snapshot = bare_snapshot(1_000);
        assert!(snapshot.is_valid());
        assert_eq!(snapshot.populated_domain_count(), 0);
    }

    #[test]
    fn data_points_grow_with_records() {
        let mut snapshot = bare_snapshot(1_000);
        let base = snapshot.data_point_count();
        snapshot.system = Some(SystemRecord {
            ticks_processed: 1,
            last_tick_duration_nanos: 1_000,
            average_tick_duration_nanos: 1_000,
            chat_queue_depth: 0,
            inventory_queue_depth: 0,
        });
        assert!(snapshot.data_point_count() > base);
    }

    #[test]
    fn snapshot_roundtrip_serde() {
        let snapshot = bare_snapshot(42);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TickSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
