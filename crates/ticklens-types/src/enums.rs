//! Closed enumerations for the telemetry domain.
//!
//! The host reports clicks, interfaces, and chat through loosely-typed
//! names; everything is normalized into these tagged variants at the
//! collection boundary so downstream matching is exhaustive at compile
//! time rather than string-keyed.

use serde::{Deserialize, Serialize};

/// What a recorded click was aimed at.
///
/// Classified from the host's menu-action name by
/// `ticklens-core::click::classify_target`. `Unknown` is the catch-all
/// for action names outside the recognized taxonomy -- it is a valid
/// classification, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// An interactable object in the scene (door, booth, furnace, ...).
    GameObject,
    /// A non-player character.
    Npc,
    /// Another player.
    Player,
    /// An item lying on the ground.
    GroundItem,
    /// An item in the local actor's inventory.
    InventoryItem,
    /// A UI widget or interface component.
    Interface,
    /// A walk-here click on a tile.
    Walk,
    /// Anything that matched no known action-name pattern.
    Unknown,
}

impl TargetType {
    /// Prefix used when synthesizing a fallback target name, e.g.
    /// `GameObject_1234`.
    pub const fn synthetic_prefix(self) -> &'static str {
        match self {
            Self::GameObject => "GameObject",
            Self::Npc => "Npc",
            Self::Player => "Player",
            Self::GroundItem => "GroundItem",
            Self::InventoryItem => "Item",
            Self::Interface => "Interface",
            Self::Walk => "Tile",
            Self::Unknown => "Unknown",
        }
    }
}

/// Kind of UI interface a root widget group maps to.
///
/// The group-id table lives in the interface collector; widget groups
/// outside the table classify as `Unknown` and are excluded from the
/// open-interface list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InterfaceKind {
    /// The chat box.
    Chatbox,
    /// The inventory side panel.
    Inventory,
    /// The skills/stats panel.
    Skills,
    /// The quest journal.
    Quest,
    /// The settings panel.
    Settings,
    /// The bank interface.
    Bank,
    /// A shop interface.
    Shop,
    /// The player-to-player trade screen.
    Trade,
    /// The market/exchange interface.
    GrandExchange,
    /// The worn-equipment panel.
    Equipment,
    /// An NPC or player dialogue box.
    Dialogue,
    /// The prayer panel.
    Prayer,
    /// The spellbook panel.
    Spells,
    /// Any widget group not in the static table.
    Unknown,
}

/// Rollup category for a chat message.
///
/// The host reports fine-grained message types; the social collector
/// folds them into these four buckets plus `Other` for types with no
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChatCategory {
    /// Public chat visible to everyone nearby.
    Public,
    /// Private messages, incoming or outgoing.
    Private,
    /// Clan or friends-channel messages.
    Clan,
    /// Game, engine, console, and broadcast messages.
    System,
    /// Message types outside the four rollup buckets.
    Other,
}

/// Direction of a banking action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BankAction {
    /// Moving items from inventory into the bank.
    Deposit,
    /// Moving items from the bank into inventory.
    Withdraw,
}

/// How a click was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClickKind {
    /// A direct left click (single default action).
    Left,
    /// A selection from an opened right-click menu.
    Menu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_prefixes_are_distinct_for_entity_types() {
        assert_ne!(
            TargetType::GameObject.synthetic_prefix(),
            TargetType::Npc.synthetic_prefix()
        );
        assert_eq!(TargetType::InventoryItem.synthetic_prefix(), "Item");
    }

    #[test]
    fn enums_roundtrip_serde() {
        let json = serde_json::to_string(&ChatCategory::Clan).ok();
        assert_eq!(json.as_deref(), Some("\"Clan\""));
        let back: Result<ChatCategory, _> = serde_json::from_str("\"Clan\"");
        assert_eq!(back.ok(), Some(ChatCategory::Clan));
    }
}
