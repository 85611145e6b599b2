//! Input domain: mouse, keyboard, camera, menu, movement, clicks.
//!
//! The only collector with cross-tick state of its own: it owns the
//! movement and mouse cursors and advances them exactly once per tick,
//! whether or not positional data was available.

use chrono::{DateTime, Utc};
use ticklens_host::{HostState, InputCounters};
use ticklens_types::records::InputRecord;

use crate::analytics::{MouseTracker, MovementTracker};
use crate::collectors::CollectError;
use crate::session::SessionContext;

/// Stateful input collector; one instance per session.
#[derive(Debug, Default)]
pub struct InputCollector {
    movement: MovementTracker,
    mouse: MouseTracker,
}

impl InputCollector {
    /// Create a collector with fresh cursors.
    pub const fn new() -> Self {
        Self {
            movement: MovementTracker::new(),
            mouse: MouseTracker::new(),
        }
    }

    /// Collect the input sub-record and consume the pending click
    /// context, if any.
    ///
    /// Never fails: every field degrades independently to its zero
    /// value. Both cursors advance unconditionally so state stays
    /// coherent across ticks with missing data.
    pub fn collect(
        &mut self,
        host: &dyn HostState,
        counters: &dyn InputCounters,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<InputRecord, CollectError> {
        let mouse_position = host.mouse_position();
        let mouse_idle_ms = self.mouse.observe(mouse_position, now);

        let position = host.local_actor().and_then(|a| a.position);
        let movement = self.movement.advance(position, now);

        Ok(InputRecord {
            mouse: mouse_position,
            mouse_idle_ms,
            key_press_count: counters.take_key_press_count(),
            camera: host.camera_pose(),
            last_menu_option: host.last_menu_option(),
            movement_distance: movement.distance,
            movement_speed: movement.speed,
            click_context: session.take_pending_click(),
        })
    }
}
