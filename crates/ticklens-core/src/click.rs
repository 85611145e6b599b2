//! Click classification and target-name resolution.
//!
//! A raw menu action arrives from the host as loosely-typed strings
//! plus a numeric identifier. Classification is a prefix/substring
//! match over the action-type name into the closed [`TargetType`]
//! taxonomy; name resolution then dispatches per type, structured
//! lookup first, raw-target cleanup second, synthetic `<Type>_<id>`
//! last. The finished [`ClickContext`] goes into the session's pending
//! slot and reaches exactly one snapshot.

use chrono::{DateTime, Utc};
use ticklens_host::HostState;
use ticklens_types::enums::{ClickKind, TargetType};
use ticklens_types::events::ClickContext;
use ticklens_types::point::TilePoint;

use crate::resolve::{self, Resolution};

/// A raw menu action as delivered by the host's click callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMenuAction {
    /// Host action-type name, e.g. `GAME_OBJECT_FIRST_OPTION`.
    pub action_name: String,
    /// Menu option text, e.g. `Take` or `Withdraw-5`.
    pub option: String,
    /// Raw target string, possibly wrapped in markup tags.
    pub target: String,
    /// Numeric identifier of the target entity/item/widget.
    pub id: i32,
    /// Number of menu entries open when the click fired; more than one
    /// means a right-click menu selection.
    pub open_menu_entries: u32,
}

/// Classify an action-type name into the target taxonomy.
///
/// Order matters: the specific entity prefixes are checked before the
/// broader substring rules, so `GAME_OBJECT_*` never falls through to
/// the `ITEM` rule.
pub fn classify_target(action_name: &str) -> TargetType {
    let name = action_name.trim().to_ascii_uppercase();

    if name.starts_with("GAME_OBJECT_") {
        return TargetType::GameObject;
    }
    if name.starts_with("NPC_") {
        return TargetType::Npc;
    }
    if name.starts_with("GROUND_ITEM_") {
        return TargetType::GroundItem;
    }
    if name.contains("PLAYER") {
        return TargetType::Player;
    }
    if name.starts_with("WIDGET_") || name.starts_with("CC_") {
        return TargetType::Interface;
    }
    if name.contains("ITEM") {
        return TargetType::InventoryItem;
    }
    if name == "WALK" {
        return TargetType::Walk;
    }
    TargetType::Unknown
}

/// Strip markup wrappers (`<col=...>`, `<img=...>`, any `<...>` tag)
/// from a raw target string and trim the remainder.
pub fn clean_target(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => cleaned.push(ch),
            _ => {}
        }
    }
    cleaned.trim().to_owned()
}

/// Resolve a display name for a classified target.
///
/// Dispatches per type: composition lookup for objects, NPCs, and
/// items; cleaned raw target for players and everything else. A
/// lookup fallback that produced a synthetic name defers to the
/// cleaned raw target when one exists, keeping the human-readable
/// string whenever the host gave us any.
fn resolve_target_name(host: &dyn HostState, action: &RawMenuAction, target_type: TargetType) -> String {
    let structured = match target_type {
        TargetType::GameObject => Some(resolve::resolve_object_name(host, action.id)),
        TargetType::Npc => Some(resolve::resolve_npc_name(host, action.id)),
        TargetType::GroundItem | TargetType::InventoryItem => {
            Some(resolve::resolve_item_name(host, action.id))
        }
        TargetType::Player
        | TargetType::Interface
        | TargetType::Walk
        | TargetType::Unknown => None,
    };

    let cleaned = clean_target(&action.target);

    match structured {
        Some(Resolution::Resolved(name)) => name,
        Some(Resolution::Fallback { name, .. }) => {
            if cleaned.is_empty() {
                name
            } else {
                cleaned
            }
        }
        None => {
            if cleaned.is_empty() {
                format!("{}_{}", target_type.synthetic_prefix(), action.id)
            } else {
                cleaned
            }
        }
    }
}

/// World coordinates for tile-anchored targets.
///
/// Only walk and ground-item clicks carry a world tile: the pending
/// destination when the actor is already pathing, else the current
/// tile. Every failure to obtain coordinates yields `None`.
fn world_coordinates(host: &dyn HostState, target_type: TargetType) -> Option<TilePoint> {
    match target_type {
        TargetType::Walk | TargetType::GroundItem => {
            let actor = host.local_actor()?;
            actor.destination.or(actor.position)
        }
        _ => None,
    }
}

/// Build the fully resolved click context for a raw menu action.
///
/// Total: every raw action produces a context, with `Unknown` and
/// synthetic names standing in where classification or resolution
/// found nothing better.
pub fn build_click_context(
    host: &dyn HostState,
    action: &RawMenuAction,
    clicked_at: DateTime<Utc>,
) -> ClickContext {
    let target_type = classify_target(&action.action_name);
    let target_name = resolve_target_name(host, action, target_type);
    let kind = if action.open_menu_entries > 1 {
        ClickKind::Menu
    } else {
        ClickKind::Left
    };

    ClickContext {
        kind,
        action_name: action.action_name.clone(),
        option: action.option.clone(),
        target_type,
        target_name,
        target_id: action.id,
        screen: host.mouse_position(),
        world: world_coordinates(host, target_type),
        clicked_at,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_host::{LocalActor, StubHost};

    use super::*;

    fn action(name: &str, option: &str, target: &str, id: i32) -> RawMenuAction {
        RawMenuAction {
            action_name: name.to_owned(),
            option: option.to_owned(),
            target: target.to_owned(),
            id,
            open_menu_entries: 1,
        }
    }

    #[test]
    fn classification_covers_taxonomy() {
        assert_eq!(classify_target("GAME_OBJECT_FIRST_OPTION"), TargetType::GameObject);
        assert_eq!(classify_target("NPC_SECOND_OPTION"), TargetType::Npc);
        assert_eq!(classify_target("GROUND_ITEM_FIRST_OPTION"), TargetType::GroundItem);
        assert_eq!(classify_target("PLAYER_TRADE"), TargetType::Player);
        assert_eq!(classify_target("WIDGET_TARGET"), TargetType::Interface);
        assert_eq!(classify_target("CC_OP"), TargetType::Interface);
        assert_eq!(classify_target("ITEM_USE"), TargetType::InventoryItem);
        assert_eq!(classify_target("WALK"), TargetType::Walk);
        assert_eq!(classify_target("EXAMINE_SOMETHING"), TargetType::Unknown);
    }

    #[test]
    fn object_prefix_beats_item_substring() {
        // "GAME_OBJECT_..." contains no ITEM, but NPC names could;
        // ordering keeps specific prefixes ahead of broad substrings.
        assert_eq!(classify_target("GROUND_ITEM_THIRD_OPTION"), TargetType::GroundItem);
    }

    #[test]
    fn clean_target_strips_markup() {
        assert_eq!(clean_target("<col=ffff00>Goblin</col>  "), "Goblin");
        assert_eq!(clean_target("Plain"), "Plain");
        assert_eq!(clean_target("<col=00ff00>"), "");
    }

    #[test]
    fn object_click_uses_composition_name() {
        let host = StubHost::new();
        host.add_object_name(2213, "Bank booth");
        let ctx = build_click_context(
            &host,
            &action("GAME_OBJECT_FIRST_OPTION", "Bank", "<col=00ffff>Bank booth</col>", 2213),
            Utc::now(),
        );
        assert_eq!(ctx.target_type, TargetType::GameObject);
        assert_eq!(ctx.target_name, "Bank booth");
    }

    #[test]
    fn failed_lookup_falls_back_to_cleaned_target() {
        let host = StubHost::new();
        host.fail_lookup(2213);
        let ctx = build_click_context(
            &host,
            &action("GAME_OBJECT_FIRST_OPTION", "Bank", "<col=00ffff>Bank booth</col>", 2213),
            Utc::now(),
        );
        assert_eq!(ctx.target_name, "Bank booth");
    }

    #[test]
    fn failed_lookup_without_target_goes_synthetic() {
        let host = StubHost::new();
        host.fail_lookup(2213);
        let ctx = build_click_context(
            &host,
            &action("GAME_OBJECT_FIRST_OPTION", "Bank", "", 2213),
            Utc::now(),
        );
        assert_eq!(ctx.target_name, "GameObject_2213");
    }

    #[test]
    fn player_click_uses_cleaned_target() {
        let host = StubHost::new();
        let ctx = build_click_context(
            &host,
            &action("PLAYER_FOLLOW", "Follow", "<col=ffffff>Bob</col>", 7),
            Utc::now(),
        );
        assert_eq!(ctx.target_type, TargetType::Player);
        assert_eq!(ctx.target_name, "Bob");
    }

    #[test]
    fn walk_click_carries_world_tile() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            position: Some(TilePoint::new(3200, 3200, 0)),
            destination: Some(TilePoint::new(3210, 3195, 0)),
            ..LocalActor::default()
        });
        let ctx = build_click_context(&host, &action("WALK", "Walk here", "", 0), Utc::now());
        // Pending destination wins over the current tile.
        assert_eq!(ctx.world, Some(TilePoint::new(3210, 3195, 0)));
    }

    #[test]
    fn interface_click_has_no_world_tile() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            position: Some(TilePoint::new(3200, 3200, 0)),
            ..LocalActor::default()
        });
        let ctx = build_click_context(
            &host,
            &action("WIDGET_TARGET", "Use", "Spellbook", 14),
            Utc::now(),
        );
        assert_eq!(ctx.world, None);
    }

    #[test]
    fn menu_kind_detected_from_open_entries() {
        let host = StubHost::new();
        let mut raw = action("NPC_FIRST_OPTION", "Talk-to", "Shopkeeper", 520);
        raw.open_menu_entries = 4;
        let ctx = build_click_context(&host, &raw, Utc::now());
        assert_eq!(ctx.kind, ClickKind::Menu);
        assert_eq!(ctx.target_name, "Shopkeeper");
    }
}
