//! Per-domain sub-records aggregated into a tick snapshot.
//!
//! Each collector produces exactly one of these per tick. A missing
//! record signals an isolated collector failure for that domain and
//! never invalidates the snapshot.
//!
//! Every record reports its own `data_point_count` so the snapshot can
//! derive totals on demand without caching.

use serde::{Deserialize, Serialize};

use crate::enums::{ChatCategory, InterfaceKind};
use crate::events::{ClickContext, InventorySlot};
use crate::point::TilePoint;

/// Identity, position, and carried-item state of the local actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name; `"UnknownPlayer"` when the host has none yet.
    pub display_name: String,
    /// Current world tile, if the local actor is present in the scene.
    pub position: Option<TilePoint>,
    /// Occupied inventory slots at capture time.
    pub inventory: Vec<InventorySlot>,
    /// JSON projection of the inventory with resolved item names,
    /// schema `[{"slot":..,"id":..,"quantity":..,"name":".."}]`.
    /// `"[]"` when the inventory is empty or unavailable.
    pub inventory_json: String,
    /// Total quantity across all occupied slots.
    pub total_quantity: i64,
    /// Resolved names of currently worn equipment.
    pub equipped_items: Vec<String>,
}

impl PlayerRecord {
    /// Number of individual data points this record contributes.
    pub fn data_point_count(&self) -> usize {
        // name + position + json + total, plus one per slot and one per
        // equipped item.
        4_usize
            .saturating_add(self.inventory.len())
            .saturating_add(self.equipped_items.len())
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.display_name
            .len()
            .saturating_add(self.inventory_json.len())
            .saturating_add(self.inventory.len().saturating_mul(12))
            .saturating_add(self.equipped_items.iter().map(|s| s.len()).sum::<usize>())
    }
}

/// Scene-level environment summary around the local actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    /// Vertical level the local actor occupies.
    pub plane: i32,
    /// Number of other players in the scene.
    pub nearby_player_count: u32,
    /// Number of NPCs in the scene.
    pub nearby_npc_count: u32,
    /// Name of the closest other player, if any.
    pub closest_player_name: Option<String>,
    /// Tile distance to the closest other player.
    pub closest_player_distance: Option<f64>,
    /// Name of the closest NPC, if any.
    pub closest_npc_name: Option<String>,
    /// Tile distance to the closest NPC.
    pub closest_npc_distance: Option<f64>,
}

impl WorldRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        7
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.closest_player_name
            .as_ref()
            .map_or(0, |s| s.len())
            .saturating_add(self.closest_npc_name.as_ref().map_or(0, |s| s.len()))
            .saturating_add(40)
    }
}

/// Camera orientation and zoom, passed through from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Horizontal rotation.
    pub yaw: i32,
    /// Vertical tilt.
    pub pitch: i32,
    /// Zoom level.
    pub zoom: i32,
}

/// Mouse, keyboard, camera, and click activity for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Mouse canvas position at capture time.
    pub mouse: Option<(i32, i32)>,
    /// Milliseconds since the mouse last moved; 0 on first observation.
    pub mouse_idle_ms: u64,
    /// Key presses since the previous tick (read-and-reset).
    pub key_press_count: u32,
    /// Camera pose passthrough.
    pub camera: Option<CameraPose>,
    /// Option text of the most recent menu entry, if one is open.
    pub last_menu_option: Option<String>,
    /// Tiles moved since the previous tick (3-D Euclidean).
    pub movement_distance: f64,
    /// Movement speed in tiles per second; 0 when stationary.
    pub movement_speed: f64,
    /// Pending click context, present in at most one snapshot.
    pub click_context: Option<ClickContext>,
}

impl InputRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        // mouse, idle, keys, camera, menu, distance, speed, click.
        8
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.last_menu_option
            .as_ref()
            .map_or(0, |s| s.len())
            .saturating_add(self.click_context.as_ref().map_or(0, |c| {
                c.action_name
                    .len()
                    .saturating_add(c.option.len())
                    .saturating_add(c.target_name.len())
            }))
            .saturating_add(64)
    }
}

/// Combat activity observed since the previous tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRecord {
    /// Hitsplats drained from the queue this tick.
    pub hitsplat_count: u32,
    /// Damage dealt to other actors this tick.
    pub damage_dealt: i64,
    /// Damage landed on the local actor this tick.
    pub damage_taken: i64,
    /// Animation changes drained this tick.
    pub animation_change_count: u32,
    /// Most recent animation id seen, -1 for idle.
    pub last_animation_id: i32,
    /// Interaction-target changes drained this tick.
    pub interaction_change_count: u32,
    /// Whether the local actor is currently engaged with a target.
    pub in_combat: bool,
    /// Name of the local actor's current target, if any.
    pub current_target: Option<String>,
}

impl CombatRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        8
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.current_target
            .as_ref()
            .map_or(0, |s| s.len())
            .saturating_add(48)
    }
}

/// Chat and trade activity rollup for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRecord {
    /// Messages drained from the chat queue this tick.
    pub total_message_count: u32,
    /// Public-chat messages in the drain.
    pub public_count: u32,
    /// Private messages (either direction) in the drain.
    pub private_count: u32,
    /// Clan/friends-channel messages in the drain.
    pub clan_count: u32,
    /// Game/engine/system messages in the drain.
    pub system_count: u32,
    /// Mean message length in characters; 0 when no messages.
    pub average_message_length: f64,
    /// Most frequent category, ties broken by first encountered.
    pub most_frequent_category: Option<ChatCategory>,
    /// Text of the most recent message in the drain.
    pub last_message: Option<String>,
    /// Whether the local actor appears to be trading.
    pub in_trade: bool,
    /// Name of the apparent trade partner.
    pub trade_partner: Option<String>,
}

impl SocialRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        10
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.last_message
            .as_ref()
            .map_or(0, |s| s.len())
            .saturating_add(self.trade_partner.as_ref().map_or(0, |s| s.len()))
            .saturating_add(56)
    }
}

/// Open-interface state for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interfaces classified from visible root widget groups, in scan
    /// order, deduplicated.
    pub open_interfaces: Vec<InterfaceKind>,
    /// First non-unknown interface found during the scan.
    pub primary: Option<InterfaceKind>,
    /// Bank overlay probe result.
    pub bank_open: bool,
    /// Shop overlay probe result.
    pub shop_open: bool,
    /// Trade overlay probe result.
    pub trade_open: bool,
    /// Market/exchange overlay probe result.
    pub exchange_open: bool,
    /// Equipment overlay probe result.
    pub equipment_open: bool,
    /// Interface interactions since the previous tick (read-and-reset).
    pub interaction_count: u32,
    /// Container changes that landed in the bank since the previous
    /// tick (deposits).
    pub recent_deposit_count: u32,
    /// Container changes that landed in the inventory since the
    /// previous tick (withdrawals).
    pub recent_withdrawal_count: u32,
    /// Last known withdraw method ("1", "5", "10", "all", "x").
    pub last_withdraw_method: Option<String>,
    /// Last known deposit method.
    pub last_deposit_method: Option<String>,
}

impl InterfaceRecord {
    /// Number of individual data points this record contributes.
    pub fn data_point_count(&self) -> usize {
        11_usize.saturating_add(self.open_interfaces.len())
    }

    /// Rough heap footprint in bytes.
    pub fn estimated_bytes(&self) -> usize {
        self.open_interfaces
            .len()
            .saturating_mul(4)
            .saturating_add(self.last_withdraw_method.as_ref().map_or(0, |s| s.len()))
            .saturating_add(self.last_deposit_method.as_ref().map_or(0, |s| s.len()))
            .saturating_add(24)
    }
}

/// Engine-side processing metrics for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Ticks processed so far in this session, including this one.
    pub ticks_processed: u64,
    /// Processing duration of the previous tick in nanoseconds.
    pub last_tick_duration_nanos: u64,
    /// Mean processing duration across the session in nanoseconds.
    pub average_tick_duration_nanos: u64,
    /// Chat-queue depth observed before this tick's drain.
    pub chat_queue_depth: u32,
    /// Inventory-queue depth observed before this tick's drain.
    pub inventory_queue_depth: u32,
}

impl SystemRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        5
    }

    /// Rough heap footprint in bytes.
    pub const fn estimated_bytes(&self) -> usize {
        40
    }
}

/// Post-collection completeness summary, produced by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Domains whose collector produced a record this tick.
    pub populated_domains: u32,
    /// Total domains the orchestrator ran.
    pub total_domains: u32,
    /// `populated / total` in the unit interval.
    pub completeness: f64,
}

impl AnalysisRecord {
    /// Number of individual data points this record contributes.
    pub const fn data_point_count(&self) -> usize {
        3
    }
}
