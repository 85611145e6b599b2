//! Interface domain: open-UI scan, overlay probes, interaction count.

use ticklens_host::HostState;
use ticklens_types::enums::{BankAction, InterfaceKind};
use ticklens_types::records::InterfaceRecord;

use crate::collectors::CollectError;
use crate::session::SessionContext;

/// Widget group id of the bank overlay.
const GROUP_BANK: u32 = 213;
/// Widget group id of the shop overlay.
const GROUP_SHOP: u32 = 300;
/// Widget group id of the trade overlay.
const GROUP_TRADE: u32 = 335;
/// Widget group id of the market/exchange overlay.
const GROUP_EXCHANGE: u32 = 465;
/// Widget group id of the equipment overlay.
const GROUP_EQUIPMENT: u32 = 387;

/// Host container id of the local actor's inventory.
const CONTAINER_INVENTORY: i32 = 93;
/// Host container id of the bank.
const CONTAINER_BANK: i32 = 95;

/// Static widget-group-id to interface-kind table.
pub const fn classify_group(group_id: u32) -> InterfaceKind {
    match group_id {
        12 => InterfaceKind::Chatbox,
        149 => InterfaceKind::Inventory,
        320 => InterfaceKind::Skills,
        399 => InterfaceKind::Quest,
        116 => InterfaceKind::Settings,
        213 => InterfaceKind::Bank,
        300 => InterfaceKind::Shop,
        335 => InterfaceKind::Trade,
        465 => InterfaceKind::GrandExchange,
        387 => InterfaceKind::Equipment,
        231 => InterfaceKind::Dialogue,
        219 => InterfaceKind::Prayer,
        218 => InterfaceKind::Spells,
        _ => InterfaceKind::Unknown,
    }
}

/// Add a kind to the open list if the scan has not already found it,
/// filling `primary` on the first non-unknown hit.
fn note_open(
    kind: InterfaceKind,
    open: &mut Vec<InterfaceKind>,
    primary: &mut Option<InterfaceKind>,
) {
    if kind == InterfaceKind::Unknown {
        return;
    }
    if !open.contains(&kind) {
        open.push(kind);
    }
    if primary.is_none() {
        *primary = Some(kind);
    }
}

/// Collect the interface sub-record.
///
/// Scans visible root widget groups through the static table, merges
/// the explicit overlay probes (a probe can see overlays the root scan
/// misses), reports the first non-unknown interface as primary,
/// reduces the drained container changes to deposit/withdrawal counts,
/// and reads-and-resets the tick-scoped interaction counter. Never
/// fails.
pub fn collect(host: &dyn HostState, session: &SessionContext) -> Result<InterfaceRecord, CollectError> {
    let mut open = Vec::new();
    let mut primary = None;

    for group in host.visible_widget_groups() {
        note_open(classify_group(group), &mut open, &mut primary);
    }

    let bank_open = host.widget_visible(GROUP_BANK);
    let shop_open = host.widget_visible(GROUP_SHOP);
    let trade_open = host.widget_visible(GROUP_TRADE);
    let exchange_open = host.widget_visible(GROUP_EXCHANGE);
    let equipment_open = host.widget_visible(GROUP_EQUIPMENT);

    if bank_open {
        note_open(InterfaceKind::Bank, &mut open, &mut primary);
    }
    if shop_open {
        note_open(InterfaceKind::Shop, &mut open, &mut primary);
    }
    if trade_open {
        note_open(InterfaceKind::Trade, &mut open, &mut primary);
    }
    if exchange_open {
        note_open(InterfaceKind::GrandExchange, &mut open, &mut primary);
    }
    if equipment_open {
        note_open(InterfaceKind::Equipment, &mut open, &mut primary);
    }

    // A change landing in the bank container is a deposit; one landing
    // in the inventory while banking is a withdrawal.
    let mut recent_deposit_count = 0_u32;
    let mut recent_withdrawal_count = 0_u32;
    for change in session.drain_inventory_changes() {
        if change.container_id == CONTAINER_BANK {
            recent_deposit_count = recent_deposit_count.saturating_add(1);
        } else if change.container_id == CONTAINER_INVENTORY && bank_open {
            recent_withdrawal_count = recent_withdrawal_count.saturating_add(1);
        }
    }

    Ok(InterfaceRecord {
        open_interfaces: open,
        primary,
        bank_open,
        shop_open,
        trade_open,
        exchange_open,
        equipment_open,
        interaction_count: session.take_interface_interactions(),
        recent_deposit_count,
        recent_withdrawal_count,
        last_withdraw_method: session.last_banking_method(BankAction::Withdraw),
        last_deposit_method: session.last_banking_method(BankAction::Deposit),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use ticklens_host::StubHost;
    use ticklens_types::ids::SessionId;

    use crate::click::RawMenuAction;
    use crate::config::QueueConfig;

    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(SessionId::new(), &QueueConfig::default(), Utc::now())
    }

    #[test]
    fn group_table_covers_known_interfaces() {
        assert_eq!(classify_group(12), InterfaceKind::Chatbox);
        assert_eq!(classify_group(213), InterfaceKind::Bank);
        assert_eq!(classify_group(465), InterfaceKind::GrandExchange);
        assert_eq!(classify_group(5000), InterfaceKind::Unknown);
    }

    #[test]
    fn nothing_visible_reports_empty() {
        let host = StubHost::new();
        let ctx = session();
        let record = collect(&host, &ctx).unwrap();
        assert!(record.open_interfaces.is_empty());
        assert!(record.primary.is_none());
        assert!(!record.bank_open);
    }

    #[test]
    fn primary_is_first_non_unknown_in_scan_order() {
        let host = StubHost::new();
        // 7777 classifies unknown, then chatbox, then bank.
        host.set_visible_widget_groups(vec![7777, 12, 213]);
        let ctx = session();
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.primary, Some(InterfaceKind::Chatbox));
        assert_eq!(
            record.open_interfaces,
            vec![InterfaceKind::Chatbox, InterfaceKind::Bank]
        );
        assert!(record.bank_open);
    }

    #[test]
    fn probe_results_merge_without_duplicates() {
        let host = StubHost::new();
        host.set_visible_widget_groups(vec![213]);
        let ctx = session();
        let record = collect(&host, &ctx).unwrap();
        // Bank found by both the scan and the probe; listed once.
        assert_eq!(record.open_interfaces, vec![InterfaceKind::Bank]);
        assert_eq!(record.primary, Some(InterfaceKind::Bank));
    }

    #[test]
    fn interaction_count_resets_between_ticks() {
        let host = StubHost::new();
        let ctx = session();
        ctx.note_interface_interaction();
        ctx.note_interface_interaction();

        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.interaction_count, 2);
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.interaction_count, 0);
    }

    #[test]
    fn container_changes_reduce_to_bank_activity() {
        let host = StubHost::new();
        host.set_visible_widget_groups(vec![213]);
        let ctx = session();

        let change = |container_id| ticklens_types::events::InventoryChangeEvent {
            container_id,
            slots: Vec::new(),
            received_at: Utc::now(),
        };
        ctx.record_inventory_change(change(CONTAINER_BANK));
        ctx.record_inventory_change(change(CONTAINER_INVENTORY));
        ctx.record_inventory_change(change(CONTAINER_INVENTORY));

        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.recent_deposit_count, 1);
        assert_eq!(record.recent_withdrawal_count, 2);

        // Drained: the next tick starts clean.
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.recent_deposit_count, 0);
        assert_eq!(record.recent_withdrawal_count, 0);
    }

    #[test]
    fn inventory_churn_without_bank_is_not_banking() {
        let host = StubHost::new();
        let ctx = session();
        ctx.record_inventory_change(ticklens_types::events::InventoryChangeEvent {
            container_id: CONTAINER_INVENTORY,
            slots: Vec::new(),
            received_at: Utc::now(),
        });
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.recent_withdrawal_count, 0);
    }

    #[test]
    fn banking_methods_surface_in_record() {
        let host = StubHost::new();
        let ctx = session();
        ctx.record_menu_click(
            &host,
            &RawMenuAction {
                action_name: String::from("CC_OP"),
                option: String::from("Withdraw-10"),
                target: String::from("Logs"),
                id: 1511,
                open_menu_entries: 2,
            },
            Utc::now(),
        );

        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.last_withdraw_method.as_deref(), Some("10"));
        assert!(record.last_deposit_method.is_none());
    }
}
