//! Social domain: chat rollups and the trade heuristic.

use chrono::{DateTime, Utc};
use ticklens_host::HostState;
use ticklens_types::enums::ChatCategory;
use ticklens_types::records::SocialRecord;

use crate::collectors::CollectError;
use crate::session::SessionContext;

/// Per-category message counts in rollup order.
///
/// The order fixes tie-breaking for the most-frequent category: ties go
/// to the category first encountered during iteration.
const ROLLUP_ORDER: [ChatCategory; 5] = [
    ChatCategory::Public,
    ChatCategory::Private,
    ChatCategory::Clan,
    ChatCategory::System,
    ChatCategory::Other,
];

/// Collect the social sub-record.
///
/// Drains the chat queue through the configured age window, rolls up
/// per-category counts, and derives the lightweight in-trade heuristic
/// from whether the local actor is interacting with another player.
/// Never fails.
pub fn collect(
    host: &dyn HostState,
    session: &SessionContext,
    window_ms: i64,
    now: DateTime<Utc>,
) -> Result<SocialRecord, CollectError> {
    let messages = session.drain_chat(window_ms, now);

    let mut counts = [0_u32; 5];
    let mut total_length = 0_usize;
    let mut last_message: Option<&str> = None;
    let mut last_seen = DateTime::<Utc>::MIN_UTC;

    for message in &messages {
        if let Some(slot) = ROLLUP_ORDER.iter().position(|c| *c == message.category) {
            if let Some(count) = counts.get_mut(slot) {
                *count = count.saturating_add(1);
            }
        }
        total_length = total_length.saturating_add(message.text.chars().count());
        if message.received_at >= last_seen {
            last_seen = message.received_at;
            last_message = Some(&message.text);
        }
    }

    let total = u32::try_from(messages.len()).unwrap_or(u32::MAX);
    let average_message_length = if messages.is_empty() {
        0.0
    } else {
        let total_f = u32::try_from(total_length).map_or(f64::MAX, f64::from);
        total_f / f64::from(total)
    };

    // First strictly-greater count wins, so earlier rollup categories
    // take ties.
    let mut most_frequent: Option<ChatCategory> = None;
    let mut best = 0_u32;
    for (category, count) in ROLLUP_ORDER.iter().zip(counts.iter()) {
        if *count > best {
            best = *count;
            most_frequent = Some(*category);
        }
    }

    let partner = host
        .local_actor()
        .and_then(|a| a.interacting)
        .filter(|t| t.is_player);

    Ok(SocialRecord {
        total_message_count: total,
        public_count: counts.first().copied().unwrap_or(0),
        private_count: counts.get(1).copied().unwrap_or(0),
        clan_count: counts.get(2).copied().unwrap_or(0),
        system_count: counts.get(3).copied().unwrap_or(0),
        average_message_length,
        most_frequent_category: most_frequent,
        last_message: last_message.map(ToOwned::to_owned),
        in_trade: partner.is_some(),
        trade_partner: partner.and_then(|t| t.name),
    })
}
