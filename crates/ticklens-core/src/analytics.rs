//! Stateful per-session analytics carried across ticks.
//!
//! Three small state machines live here: movement distance/speed,
//! mouse-idle duration, and the read-and-reset interaction counter.
//! The movement and mouse trackers are owned by the tick thread and
//! advanced exactly once per tick; the counter is shared with host
//! callbacks and therefore atomic.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use ticklens_types::point::TilePoint;

/// Output of one movement-tracker advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSample {
    /// Tiles moved since the previous observation (3-D Euclidean,
    /// plane unit-weighted).
    pub distance: f64,
    /// Tiles per second; 0 unless both elapsed time and distance are
    /// positive.
    pub speed: f64,
}

impl MovementSample {
    /// The zero sample reported when no movement data is available.
    pub const ZERO: Self = Self {
        distance: 0.0,
        speed: 0.0,
    };
}

/// Cross-tick cursor over the local actor's position.
///
/// State updates unconditionally on every advance -- even a tick with
/// no positional data moves the observation time forward, so a later
/// reappearance does not inherit a stale interval.
#[derive(Debug, Default)]
pub struct MovementTracker {
    last_position: Option<TilePoint>,
    last_observed_at: Option<DateTime<Utc>>,
}

impl MovementTracker {
    /// Create a tracker with no prior observation.
    pub const fn new() -> Self {
        Self {
            last_position: None,
            last_observed_at: None,
        }
    }

    /// Advance with the current position (or `None` when the actor is
    /// absent) and return the sample for this tick.
    ///
    /// The first observation, and any tick without a position, yields
    /// [`MovementSample::ZERO`].
    pub fn advance(&mut self, position: Option<TilePoint>, now: DateTime<Utc>) -> MovementSample {
        let sample = match (self.last_position, position) {
            (Some(last), Some(current)) => {
                let distance = last.distance_to(current);
                let elapsed_ms = self
                    .last_observed_at
                    .map_or(0, |at| now.signed_duration_since(at).num_milliseconds());
                // Speed only when both the interval and the distance
                // are positive; u32 comfortably holds a tick interval.
                let speed = u32::try_from(elapsed_ms)
                    .ok()
                    .filter(|ms| *ms > 0 && distance > 0.0)
                    .map_or(0.0, |ms| distance / f64::from(ms) * 1000.0);
                MovementSample { distance, speed }
            }
            _ => MovementSample::ZERO,
        };

        if position.is_some() {
            self.last_position = position;
        }
        self.last_observed_at = Some(now);
        sample
    }
}

/// Cross-tick cursor over the mouse position, deriving idle duration.
#[derive(Debug, Default)]
pub struct MouseTracker {
    last_position: Option<(i32, i32)>,
    last_moved_at: Option<DateTime<Utc>>,
}

impl MouseTracker {
    /// Create a tracker with no prior observation.
    pub const fn new() -> Self {
        Self {
            last_position: None,
            last_moved_at: None,
        }
    }

    /// Observe the current mouse position and return milliseconds of
    /// idle time.
    ///
    /// A changed position resets idle to 0 and stamps the move time;
    /// an unchanged position reports time since the last change. The
    /// first observation in a session always yields 0.
    pub fn observe(&mut self, position: Option<(i32, i32)>, now: DateTime<Utc>) -> u64 {
        let Some(current) = position else {
            // Pointer off-canvas: hold state, report idle since the
            // last known move.
            return self.idle_since(now);
        };

        match self.last_position {
            Some(last) if last == current => self.idle_since(now),
            _ => {
                self.last_position = Some(current);
                self.last_moved_at = Some(now);
                0
            }
        }
    }

    fn idle_since(&self, now: DateTime<Utc>) -> u64 {
        self.last_moved_at.map_or(0, |at| {
            u64::try_from(now.signed_duration_since(at).num_milliseconds()).unwrap_or(0)
        })
    }
}

/// Tick-scoped counter incremented by event callbacks between ticks.
///
/// The contract is read-and-reset: [`take`] returns the accumulated
/// count and zeroes it atomically, so a count is never delivered to
/// two ticks.
///
/// [`take`]: InteractionCounter::take
#[derive(Debug, Default)]
pub struct InteractionCounter {
    count: AtomicU32,
}

impl InteractionCounter {
    /// Create a zeroed counter.
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Record one interaction. Producer side, any thread.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Return the count accumulated since the last take and reset to 0.
    pub fn take(&self) -> u32 {
        self.count.swap(0, Ordering::Relaxed)
    }
}
