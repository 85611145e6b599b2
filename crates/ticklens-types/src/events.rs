//! Event payloads bridging host callbacks to the tick thread.
//!
//! Host notifications fire on the host's own threads; each is converted
//! into one of these timestamped payloads and pushed into the session's
//! bounded queues (or, for clicks, the single pending slot). The tick
//! thread drains them when assembling the next snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{BankAction, ChatCategory, ClickKind, TargetType};
use crate::point::TilePoint;

/// A chat message received from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Rollup category of the message.
    pub category: ChatCategory,
    /// Sender display name, if the message had one.
    pub sender: Option<String>,
    /// Message text as delivered by the host.
    pub text: String,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// One occupied slot in an item container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    /// Zero-based slot index within the container.
    pub slot: u32,
    /// Numeric item identifier.
    pub item_id: i32,
    /// Stack quantity in this slot.
    pub quantity: i32,
}

/// An item-container change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryChangeEvent {
    /// Host identifier of the container that changed.
    pub container_id: i32,
    /// Occupied slots after the change.
    pub slots: Vec<InventorySlot>,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// A classified banking click (withdraw/deposit with a method).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankingClickEvent {
    /// Whether this was a deposit or a withdrawal.
    pub action: BankAction,
    /// Quantity method parsed from the menu option: "1", "5", "10",
    /// "all", or "x".
    pub method: String,
    /// Cleaned display name of the item acted on.
    pub item_name: String,
    /// Whether the transaction used the noted form of the item.
    pub noted: bool,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// A hitsplat (damage number) applied to some actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitsplatEvent {
    /// Display name of the actor the hitsplat landed on.
    pub actor_name: String,
    /// Damage amount shown.
    pub amount: i32,
    /// Whether the hitsplat landed on the local actor.
    pub on_self: bool,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// An actor animation change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationEvent {
    /// Numeric animation identifier, -1 for idle.
    pub animation_id: i32,
    /// Whether the animation belongs to the local actor.
    pub on_self: bool,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// An interacting-target change for some actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Display name of the actor whose target changed.
    pub source_name: String,
    /// Display name of the new target, if any.
    pub target_name: Option<String>,
    /// Wall-clock time the callback fired.
    pub received_at: DateTime<Utc>,
}

/// The fully resolved description of the most recent user click.
///
/// Built by the click classifier from a raw menu action and held in the
/// session's single pending slot until the next snapshot consumes it.
/// Delivered to exactly one snapshot; a newer click overwrites an
/// unconsumed older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickContext {
    /// Left click or right-click menu selection.
    pub kind: ClickKind,
    /// Raw action-type name as reported by the host.
    pub action_name: String,
    /// Menu option text ("Take", "Withdraw-5", ...).
    pub option: String,
    /// Classified target taxonomy entry.
    pub target_type: TargetType,
    /// Resolved, human-readable target name. Never empty.
    pub target_name: String,
    /// Numeric identifier of the target.
    pub target_id: i32,
    /// Mouse position on screen at click time, if known.
    pub screen: Option<(i32, i32)>,
    /// World tile, attached only for walk and ground-item targets.
    pub world: Option<TilePoint>,
    /// Wall-clock time the click fired.
    pub clicked_at: DateTime<Utc>,
}
