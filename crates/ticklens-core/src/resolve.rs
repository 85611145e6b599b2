//! Defensive name/id resolution and the inventory JSON projection.
//!
//! Composition lookups against the host can fail, return empty strings,
//! or (for a handful of known-bad item ranges) hang the host outright.
//! Every resolution therefore runs through a fallback chain that is
//! total: known-bad ids are answered from a static table before the
//! host is ever asked, and any lookup failure degrades to a synthetic
//! name that still embeds the numeric id.
//!
//! Fallback is an explicit branch in the result type, not a caught
//! error -- callers can log *why* a name degraded.

use ticklens_host::{HostError, HostState};
use ticklens_types::events::InventorySlot;

/// Why a resolution produced a fallback name instead of a host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The id sits in a statically known problematic range; the host
    /// was never queried.
    ProblematicRange,
    /// The host lookup returned no entry for the id.
    Missing,
    /// The host lookup returned an empty (or whitespace-only) name.
    Empty,
    /// The host lookup itself failed.
    LookupFailed,
}

/// Outcome of a name resolution. Always carries a usable, non-empty
/// string either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The host produced a real display name (trimmed, JSON-escaped).
    Resolved(String),
    /// The fallback chain produced a deterministic substitute.
    Fallback {
        /// The substitute name. Never empty; the id is always
        /// recoverable from it for synthetic forms.
        name: String,
        /// Which branch of the chain produced it.
        reason: FallbackReason,
    },
}

impl Resolution {
    /// Unwrap to the display string, whichever branch was taken.
    pub fn into_name(self) -> String {
        match self {
            Self::Resolved(name) | Self::Fallback { name, .. } => name,
        }
    }

    /// Whether this resolution came from the host rather than a
    /// fallback.
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Escape a display name for embedding in a JSON string literal.
///
/// Backslashes first, then quotes; control characters do not occur in
/// host display names.
pub fn escape_json(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether an item id falls in a range known to hang or corrupt the
/// host's composition lookup. These ranges are domain data inherited
/// from the degraded-equipment item families.
pub const fn is_problematic_item_id(item_id: i32) -> bool {
    matches!(item_id, 4882..=4886 | 4856..=4881 | 4887..=4956 | 4708..=4759)
}

/// Pre-registered display name for a problematic item id.
///
/// The five core degraded set pieces have exact names; the surrounding
/// ranges get deterministic range-tagged names that keep the id
/// recoverable.
fn known_item_name(item_id: i32) -> String {
    match item_id {
        4882 => String::from("Dharok's helm (degraded)"),
        4883 => String::from("Dharok's platebody (degraded)"),
        4884 => String::from("Dharok's platelegs (degraded)"),
        4885 => String::from("Dharok's greataxe (degraded)"),
        4886 => String::from("Dharok's set (degraded)"),
        4856..=4956 => format!("Barrows item (degraded_{item_id})"),
        4708..=4759 => format!("Barrows item (variant_{item_id})"),
        _ => format!("Item_{item_id}"),
    }
}

/// Run the shared fallback chain over one primary lookup result.
fn chain(
    id: i32,
    prefix: &str,
    primary: Result<Option<String>, HostError>,
) -> Resolution {
    match primary {
        Ok(Some(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Resolution::Fallback {
                    name: format!("{prefix}_{id}"),
                    reason: FallbackReason::Empty,
                }
            } else {
                Resolution::Resolved(escape_json(trimmed))
            }
        }
        Ok(None) => Resolution::Fallback {
            name: format!("{prefix}_{id}"),
            reason: FallbackReason::Missing,
        },
        Err(_) => Resolution::Fallback {
            name: format!("{prefix}_{id}"),
            reason: FallbackReason::LookupFailed,
        },
    }
}

/// Resolve an item id to a display name. Never fails, never returns an
/// empty string.
///
/// Chain: problematic-range table, then the host's item composition,
/// then `Item_<id>`.
pub fn resolve_item_name(host: &dyn HostState, item_id: i32) -> Resolution {
    if is_problematic_item_id(item_id) {
        return Resolution::Fallback {
            name: known_item_name(item_id),
            reason: FallbackReason::ProblematicRange,
        };
    }
    if item_id <= 0 {
        return Resolution::Fallback {
            name: format!("Item_{item_id}"),
            reason: FallbackReason::Missing,
        };
    }
    chain(item_id, "Item", host.item_name(item_id))
}

/// Resolve a scene-object id to a display name. Never fails.
pub fn resolve_object_name(host: &dyn HostState, object_id: i32) -> Resolution {
    if object_id <= 0 {
        return Resolution::Fallback {
            name: format!("GameObject_{object_id}"),
            reason: FallbackReason::Missing,
        };
    }
    chain(object_id, "GameObject", host.object_name(object_id))
}

/// Resolve an NPC id to a display name. Never fails.
pub fn resolve_npc_name(host: &dyn HostState, npc_id: i32) -> Resolution {
    if npc_id <= 0 {
        return Resolution::Fallback {
            name: format!("Npc_{npc_id}"),
            reason: FallbackReason::Missing,
        };
    }
    chain(npc_id, "Npc", host.npc_name(npc_id))
}

/// Serialize occupied inventory slots to the fixed per-slot JSON
/// schema `{"slot":<int>,"id":<int>,"quantity":<int>,"name":"<string>"}`.
///
/// Empty input serializes to `"[]"`. Slots with non-positive item ids
/// are skipped. Names go through the full fallback chain, so a
/// problematic id yields its registered name instead of a host call.
/// Resolution output is already JSON-escaped, so entries are assembled
/// directly.
pub fn inventory_to_json(host: &dyn HostState, slots: &[InventorySlot]) -> String {
    let entries: Vec<String> = slots
        .iter()
        .filter(|s| s.item_id > 0)
        .map(|s| {
            let name = resolve_item_name(host, s.item_id).into_name();
            format!(
                "{{\"slot\":{},\"id\":{},\"quantity\":{},\"name\":\"{}\"}}",
                s.slot, s.item_id, s.quantity, name
            )
        })
        .collect();

    format!("[{}]", entries.join(","))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_host::StubHost;

    use super::*;

    #[test]
    fn problematic_range_never_queries_host() {
        let host = StubHost::new();
        // A scripted failure would surface if the host were queried.
        host.fail_lookup(4882);

        let resolution = resolve_item_name(&host, 4882);
        assert_eq!(
            resolution,
            Resolution::Fallback {
                name: String::from("Dharok's helm (degraded)"),
                reason: FallbackReason::ProblematicRange,
            }
        );
    }

    #[test]
    fn problematic_ranges_are_tagged_with_id() {
        let host = StubHost::new();
        let name = resolve_item_name(&host, 4900).into_name();
        assert_eq!(name, "Barrows item (degraded_4900)");
        let name = resolve_item_name(&host, 4710).into_name();
        assert_eq!(name, "Barrows item (variant_4710)");
    }

    #[test]
    fn resolved_names_are_trimmed_and_escaped() {
        let host = StubHost::new();
        host.add_item_name(995, "  \"Coins\"  ");
        let resolution = resolve_item_name(&host, 995);
        assert_eq!(resolution, Resolution::Resolved(String::from("\\\"Coins\\\"")));
    }

    #[test]
    fn empty_host_name_falls_back_to_synthetic() {
        let host = StubHost::new();
        host.add_item_name(1511, "   ");
        let resolution = resolve_item_name(&host, 1511);
        assert_eq!(
            resolution,
            Resolution::Fallback {
                name: String::from("Item_1511"),
                reason: FallbackReason::Empty,
            }
        );
    }

    #[test]
    fn lookup_failure_falls_back_to_synthetic() {
        let host = StubHost::new();
        host.fail_lookup(2000);
        let resolution = resolve_object_name(&host, 2000);
        assert!(matches!(
            resolution,
            Resolution::Fallback { reason: FallbackReason::LookupFailed, .. }
        ));
        assert_eq!(resolution.into_name(), "GameObject_2000");
    }

    #[test]
    fn never_empty_for_any_id() {
        let host = StubHost::new();
        for id in [-5, -1, 0, 1, 4882, 4956, 9999] {
            assert!(!resolve_item_name(&host, id).into_name().is_empty());
            assert!(!resolve_npc_name(&host, id).into_name().is_empty());
            assert!(!resolve_object_name(&host, id).into_name().is_empty());
        }
    }

    #[test]
    fn negative_id_embeds_id_in_name() {
        let host = StubHost::new();
        assert_eq!(resolve_npc_name(&host, -7).into_name(), "Npc_-7");
    }

    #[test]
    fn empty_inventory_serializes_to_empty_array() {
        let host = StubHost::new();
        assert_eq!(inventory_to_json(&host, &[]), "[]");
    }

    #[test]
    fn problematic_item_serializes_with_known_name() {
        let host = StubHost::new();
        host.fail_lookup(4882);
        let slots = [InventorySlot { slot: 0, item_id: 4882, quantity: 1 }];
        let json = inventory_to_json(&host, &slots);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = parsed.get(0).unwrap();
        assert_eq!(entry.get("slot").and_then(serde_json::Value::as_u64), Some(0));
        assert_eq!(entry.get("id").and_then(serde_json::Value::as_i64), Some(4882));
        assert_eq!(entry.get("quantity").and_then(serde_json::Value::as_i64), Some(1));
        assert_eq!(
            entry.get("name").and_then(serde_json::Value::as_str),
            Some("Dharok's helm (degraded)")
        );
    }

    #[test]
    fn zero_id_slots_are_skipped() {
        let host = StubHost::new();
        host.add_item_name(995, "Coins");
        let slots = [
            InventorySlot { slot: 0, item_id: 0, quantity: 0 },
            InventorySlot { slot: 3, item_id: 995, quantity: 1200 },
        ];
        let json = inventory_to_json(&host, &slots);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    }
}
