//! Per-session shared state bridging host callbacks and the tick
//! thread.
//!
//! One [`SessionContext`] exists per capture session. Host callbacks
//! call the `record_*` methods from any thread; the collectors drain
//! the queues on the tick thread. There is deliberately no process-wide
//! state -- everything lives in this context and dies with the session.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use ticklens_host::HostState;
use ticklens_types::enums::{BankAction, TargetType};
use ticklens_types::events::{
    AnimationEvent, BankingClickEvent, ChatEvent, ClickContext, HitsplatEvent,
    InteractionEvent, InventoryChangeEvent,
};
use ticklens_types::ids::SessionId;

use crate::analytics::InteractionCounter;
use crate::click::{self, RawMenuAction};
use crate::config::QueueConfig;
use crate::queue::{BoundedQueue, PendingSlot, Timestamped};

impl Timestamped for ChatEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Timestamped for InventoryChangeEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Timestamped for HitsplatEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Timestamped for AnimationEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl Timestamped for InteractionEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Shared per-session state: the bounded queues, the pending click
/// slot, the last-known banking methods, and the tick-scoped counters.
///
/// Producers only push/set/increment; the tick thread is the only
/// reader. Wrap in an `Arc` to hand to host callback registrations.
#[derive(Debug)]
pub struct SessionContext {
    /// Identifier stamped on every snapshot this session produces.
    session_id: SessionId,
    /// Wall-clock session start.
    started_at: DateTime<Utc>,
    chat: BoundedQueue<ChatEvent>,
    inventory_changes: BoundedQueue<InventoryChangeEvent>,
    hitsplats: BoundedQueue<HitsplatEvent>,
    animations: BoundedQueue<AnimationEvent>,
    interactions: BoundedQueue<InteractionEvent>,
    pending_click: PendingSlot<ClickContext>,
    banking_methods: Mutex<BTreeMap<BankAction, String>>,
    interface_interactions: InteractionCounter,
}

impl SessionContext {
    /// Create session state with the given queue capacities.
    pub fn new(session_id: SessionId, queues: &QueueConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            started_at,
            chat: BoundedQueue::new(queues.chat_capacity),
            inventory_changes: BoundedQueue::new(queues.inventory_capacity),
            hitsplats: BoundedQueue::new(queues.hitsplat_capacity),
            animations: BoundedQueue::new(queues.animation_capacity),
            interactions: BoundedQueue::new(queues.interaction_capacity),
            pending_click: PendingSlot::new(),
            banking_methods: Mutex::new(BTreeMap::new()),
            interface_interactions: InteractionCounter::new(),
        }
    }

    /// The session identifier.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Wall-clock time the session started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    // --- producer side (host callback threads) ---

    /// Queue a received chat message.
    pub fn record_chat(&self, event: ChatEvent) {
        self.chat.push(event);
    }

    /// Queue an item-container change.
    pub fn record_inventory_change(&self, event: InventoryChangeEvent) {
        self.inventory_changes.push(event);
    }

    /// Queue a hitsplat.
    pub fn record_hitsplat(&self, event: HitsplatEvent) {
        self.hitsplats.push(event);
    }

    /// Queue an animation change.
    pub fn record_animation(&self, event: AnimationEvent) {
        self.animations.push(event);
    }

    /// Queue an interaction-target change.
    pub fn record_interaction(&self, event: InteractionEvent) {
        self.interactions.push(event);
    }

    /// Process a menu click: classify it, resolve its target, store the
    /// pending context (newest wins), detect banking methods, and count
    /// interface interactions.
    pub fn record_menu_click(
        &self,
        host: &dyn HostState,
        action: &RawMenuAction,
        clicked_at: DateTime<Utc>,
    ) {
        if let Some(banking) = classify_banking_click(action, clicked_at) {
            debug!(
                action = ?banking.action,
                method = %banking.method,
                item = %banking.item_name,
                "banking method detected"
            );
            self.set_banking_method(banking.action, &banking.method);
        }

        let context = click::build_click_context(host, action, clicked_at);
        if context.target_type == TargetType::Interface {
            self.interface_interactions.increment();
        }
        debug!(
            target_type = ?context.target_type,
            target = %context.target_name,
            "click context recorded"
        );
        self.pending_click.set(context);
    }

    /// Count an interface interaction that did not come through the
    /// click path (e.g. direct widget keybinds).
    pub fn note_interface_interaction(&self) {
        self.interface_interactions.increment();
    }

    // --- consumer side (tick thread) ---

    /// Drain chat messages no older than `window_ms`.
    pub fn drain_chat(&self, window_ms: i64, now: DateTime<Utc>) -> Vec<ChatEvent> {
        self.chat.drain_window(window_ms, now)
    }

    /// Drain all queued inventory changes.
    pub fn drain_inventory_changes(&self) -> Vec<InventoryChangeEvent> {
        self.inventory_changes.drain_all()
    }

    /// Drain all queued hitsplats.
    pub fn drain_hitsplats(&self) -> Vec<HitsplatEvent> {
        self.hitsplats.drain_all()
    }

    /// Drain all queued animation changes.
    pub fn drain_animations(&self) -> Vec<AnimationEvent> {
        self.animations.drain_all()
    }

    /// Drain all queued interaction changes.
    pub fn drain_interactions(&self) -> Vec<InteractionEvent> {
        self.interactions.drain_all()
    }

    /// Take the pending click context, if one is unconsumed.
    pub fn take_pending_click(&self) -> Option<ClickContext> {
        self.pending_click.take()
    }

    /// Read-and-reset the interface interaction counter.
    pub fn take_interface_interactions(&self) -> u32 {
        self.interface_interactions.take()
    }

    /// Last known method for a banking action, e.g. `"5"` or `"all"`.
    pub fn last_banking_method(&self, action: BankAction) -> Option<String> {
        let guard = self
            .banking_methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.get(&action).cloned()
    }

    /// Chat-queue depth without draining (metrics).
    pub fn chat_depth(&self) -> usize {
        self.chat.len()
    }

    /// Inventory-queue depth without draining (metrics).
    pub fn inventory_depth(&self) -> usize {
        self.inventory_changes.len()
    }

    fn set_banking_method(&self, action: BankAction, method: &str) {
        let mut guard = self
            .banking_methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(action, method.to_owned());
    }
}

/// Parse a quantity method from the tail of a banking menu option:
/// `"1"`, `"5"`, `"10"`, `"all"`, or `"x"`. Anything else is not a
/// recognized banking method.
fn parse_banking_method(method_text: &str) -> Option<String> {
    let lower = method_text.trim().to_ascii_lowercase();
    match lower.as_str() {
        "1" | "5" | "10" | "all" | "x" => Some(lower),
        // "All-but-one" style options still mean the all method.
        other if other.starts_with("all") => Some(String::from("all")),
        other if other.starts_with('x') => Some(String::from("x")),
        _ => None,
    }
}

/// Classify a menu action as a banking click, if its option text is a
/// withdraw/deposit with a recognizable method.
pub fn classify_banking_click(
    action: &RawMenuAction,
    clicked_at: DateTime<Utc>,
) -> Option<BankingClickEvent> {
    let option = action.option.trim().to_ascii_lowercase();

    let (bank_action, method) = if let Some(rest) = option.strip_prefix("withdraw-") {
        (BankAction::Withdraw, parse_banking_method(rest)?)
    } else if let Some(rest) = option.strip_prefix("deposit-") {
        (BankAction::Deposit, parse_banking_method(rest)?)
    } else if option == "withdraw" {
        // Bare option means the default single-item click.
        (BankAction::Withdraw, String::from("1"))
    } else if option == "deposit" {
        (BankAction::Deposit, String::from("1"))
    } else {
        return None;
    };

    let item_name = click::clean_target(&action.target);
    let noted = option.contains("noted") || action.target.to_ascii_lowercase().contains("noted");

    Some(BankingClickEvent {
        action: bank_action,
        method,
        item_name: if item_name.is_empty() {
            String::from("unknown")
        } else {
            item_name
        },
        noted,
        received_at: clicked_at,
    })
}
