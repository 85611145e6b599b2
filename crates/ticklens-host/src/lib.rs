//! Read-only host interface for the Ticklens telemetry engine.
//!
//! The live game client owns all game state and fires callbacks on its
//! own threads; this crate defines the synchronous, read-only seam the
//! collectors query during a tick. Implementations must be O(1)-ish and
//! in-memory -- no collector call may block on I/O.
//!
//! The [`StubHost`] in [`stub`] is an in-memory, scriptable
//! implementation used by tests and the engine's demo session.
//!
//! [`StubHost`]: stub::StubHost

pub mod stub;

use ticklens_types::events::InventorySlot;
use ticklens_types::point::TilePoint;
use ticklens_types::records::CameraPose;

pub use stub::StubHost;

/// Errors surfaced by host-state queries.
///
/// Name lookups against the host's composition tables can fail for
/// malformed ids or internal host faults; collectors absorb these
/// through the resolution fallback chain and never propagate them.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A composition lookup failed inside the host.
    #[error("lookup failed for id {id}: {message}")]
    Lookup {
        /// The id that was being resolved.
        id: i32,
        /// Host-provided failure description.
        message: String,
    },

    /// The queried surface is not available in the current host state.
    #[error("host surface unavailable: {surface}")]
    Unavailable {
        /// Which query surface was unavailable.
        surface: &'static str,
    },
}

/// A named actor visible in the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneActor {
    /// Display name, if the host has one for this actor.
    pub name: Option<String>,
    /// Current world tile.
    pub position: TilePoint,
}

/// What the local actor is currently interacting with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractingTarget {
    /// Display name of the target, if known.
    pub name: Option<String>,
    /// Whether the target is another player (as opposed to an NPC).
    pub is_player: bool,
}

/// Live state of the local actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalActor {
    /// Display name; `None` before the host has assigned one.
    pub name: Option<String>,
    /// Current world tile, if placed in the scene.
    pub position: Option<TilePoint>,
    /// Pending movement destination, if the actor is pathing.
    pub destination: Option<TilePoint>,
    /// Current interaction target, if any.
    pub interacting: Option<InteractingTarget>,
    /// Current animation id, -1 for idle.
    pub animation_id: i32,
}

impl Default for LocalActor {
    fn default() -> Self {
        Self {
            name: None,
            position: None,
            destination: None,
            interacting: None,
            animation_id: -1,
        }
    }
}

/// Synchronous, read-only queries against live host state.
///
/// All methods are called on the tick thread only. Lookup methods
/// return `Ok(None)` for "no such entry" and `Err` for host faults;
/// both outcomes are absorbed by the caller's fallback chain.
pub trait HostState {
    /// The local actor's live state, or `None` while logged out.
    fn local_actor(&self) -> Option<LocalActor>;

    /// Mouse position on the canvas, if the pointer is over it.
    fn mouse_position(&self) -> Option<(i32, i32)>;

    /// Current camera pose.
    fn camera_pose(&self) -> Option<CameraPose>;

    /// Option text of the most recently opened menu entry.
    fn last_menu_option(&self) -> Option<String>;

    /// Group ids of currently visible root widgets, in scan order.
    fn visible_widget_groups(&self) -> Vec<u32>;

    /// Whether any widget in the given group is currently visible.
    /// Used for the explicit overlay probes.
    fn widget_visible(&self, group: u32) -> bool;

    /// Display name for an item id from the host's composition table.
    fn item_name(&self, id: i32) -> Result<Option<String>, HostError>;

    /// Display name for a scene-object id.
    fn object_name(&self, id: i32) -> Result<Option<String>, HostError>;

    /// Display name for an NPC id.
    fn npc_name(&self, id: i32) -> Result<Option<String>, HostError>;

    /// Other players currently in the scene.
    fn scene_players(&self) -> Vec<SceneActor>;

    /// NPCs currently in the scene.
    fn scene_npcs(&self) -> Vec<SceneActor>;

    /// Occupied slots of the local actor's inventory container.
    fn inventory_slots(&self) -> Vec<InventorySlot>;

    /// Item ids currently worn by the local actor.
    fn equipment_item_ids(&self) -> Vec<i32>;
}

/// Read-and-reset input counters maintained by the host's listeners.
///
/// The keyboard listener increments between ticks; the input collector
/// takes the count exactly once per tick. Callers must not read
/// without resetting, or presses would be double counted.
pub trait InputCounters {
    /// Key presses since the last call; resets the counter to zero.
    fn take_key_press_count(&self) -> u32;
}
