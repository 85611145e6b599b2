//! Player domain: identity, position, inventory, equipment.

use ticklens_host::HostState;
use ticklens_types::records::PlayerRecord;

use crate::collectors::CollectError;
use crate::resolve;

/// Fallback display name before the host has assigned one.
const UNKNOWN_PLAYER: &str = "UnknownPlayer";

/// Collect the player sub-record.
///
/// Fails with [`CollectError::ActorUnavailable`] while logged out --
/// there is no player state to report and the orchestrator records the
/// domain as missing for this tick. A present actor with no name yet
/// reports as `"UnknownPlayer"`.
pub fn collect(host: &dyn HostState) -> Result<PlayerRecord, CollectError> {
    let actor = host.local_actor().ok_or(CollectError::ActorUnavailable)?;

    let inventory = host.inventory_slots();
    let inventory_json = resolve::inventory_to_json(host, &inventory);
    let total_quantity = inventory
        .iter()
        .filter(|s| s.item_id > 0)
        .map(|s| i64::from(s.quantity))
        .fold(0_i64, i64::saturating_add);

    let equipped_items: Vec<String> = host
        .equipment_item_ids()
        .iter()
        .filter(|id| **id > 0)
        .map(|id| resolve::resolve_item_name(host, *id).into_name())
        .collect();

    Ok(PlayerRecord {
        display_name: actor.name.unwrap_or_else(|| String::from(UNKNOWN_PLAYER)),
        position: actor.position,
        inventory,
        inventory_json,
        total_quantity,
        equipped_items,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_host::{LocalActor, StubHost};
    use ticklens_types::events::InventorySlot;
    use ticklens_types::point::TilePoint;

    use super::*;

    #[test]
    fn logged_out_host_fails_collection() {
        let host = StubHost::new();
        assert!(matches!(collect(&host), Err(CollectError::ActorUnavailable)));
    }

    #[test]
    fn unnamed_actor_reports_unknown_player() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor::default());
        let record = collect(&host).unwrap();
        assert_eq!(record.display_name, "UnknownPlayer");
        assert_eq!(record.inventory_json, "[]");
    }

    #[test]
    fn inventory_totals_and_names_resolve() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            name: Some(String::from("Alice")),
            position: Some(TilePoint::new(3222, 3218, 0)),
            ..LocalActor::default()
        });
        host.add_item_name(995, "Coins");
        host.set_inventory(vec![
            InventorySlot { slot: 0, item_id: 995, quantity: 1200 },
            InventorySlot { slot: 5, item_id: 4882, quantity: 1 },
        ]);
        host.set_equipment(vec![1127]);
        host.add_item_name(1127, "Rune platebody");

        let record = collect(&host).unwrap();
        assert_eq!(record.total_quantity, 1201);
        assert!(record.inventory_json.contains("\"Coins\""));
        assert!(record.inventory_json.contains("Dharok's helm (degraded)"));
        assert_eq!(record.equipped_items, vec![String::from("Rune platebody")]);
    }
}
