//! Scripted demo session.
//!
//! Seeds a [`StubHost`] with a small world and replays a deterministic
//! activity script against it, one step per tick: walking, chatting,
//! clicking, and banking. This gives the engine binary a full pipeline
//! to demonstrate without a live host attached.

use chrono::Utc;
use ticklens_core::click::RawMenuAction;
use ticklens_core::session::SessionContext;
use ticklens_host::{LocalActor, SceneActor, StubHost};
use ticklens_types::enums::ChatCategory;
use ticklens_types::events::{ChatEvent, InventorySlot};
use ticklens_types::point::TilePoint;
use ticklens_types::records::CameraPose;

/// Deterministic scripted session driving a stub host.
#[derive(Debug)]
pub struct DemoSession {
    host: StubHost,
    step: u64,
}

impl DemoSession {
    /// Seed the demo world: a named actor, a shopkeeper, some items.
    pub fn new() -> Self {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            name: Some(String::from("DemoActor")),
            position: Some(TilePoint::new(3222, 3218, 0)),
            ..LocalActor::default()
        });
        host.set_mouse(380, 240);
        host.set_camera(CameraPose {
            yaw: 1024,
            pitch: 256,
            zoom: 512,
        });
        host.add_npc_name(520, "Shopkeeper");
        host.add_object_name(2213, "Bank booth");
        host.add_item_name(995, "Coins");
        host.add_item_name(1511, "Logs");
        host.set_scene_npcs(vec![SceneActor {
            name: Some(String::from("Shopkeeper")),
            position: TilePoint::new(3225, 3220, 0),
        }]);
        host.set_inventory(vec![InventorySlot {
            slot: 0,
            item_id: 995,
            quantity: 1_000,
        }]);
        host.set_visible_widget_groups(vec![12, 149]);

        Self { host, step: 0 }
    }

    /// The scripted host, for wiring into the orchestrator.
    pub const fn host(&self) -> &StubHost {
        &self.host
    }

    /// Play one step of the script: move the actor a tile east, then
    /// fire whichever events this step schedules.
    pub fn advance(&mut self, session: &SessionContext) {
        self.step = self.step.saturating_add(1);
        let step = self.step;
        let x = 3222_i32.saturating_add(i32::try_from(step % 24).unwrap_or(0));

        self.host.set_local_actor(LocalActor {
            name: Some(String::from("DemoActor")),
            position: Some(TilePoint::new(x, 3218, 0)),
            ..LocalActor::default()
        });

        if step % 3 == 0 {
            session.record_chat(ChatEvent {
                category: ChatCategory::Public,
                sender: Some(String::from("Bystander")),
                text: format!("demo chatter {step}"),
                received_at: Utc::now(),
            });
        }

        if step % 5 == 0 {
            self.host.press_keys(2);
            session.record_menu_click(
                &self.host,
                &RawMenuAction {
                    action_name: String::from("NPC_FIRST_OPTION"),
                    option: String::from("Talk-to"),
                    target: String::from("<col=ffff00>Shopkeeper</col>"),
                    id: 520,
                    open_menu_entries: 1,
                },
                Utc::now(),
            );
        }

        if step % 8 == 0 {
            // Bank visit: overlay opens and a withdraw fires.
            self.host.set_visible_widget_groups(vec![12, 149, 213]);
            session.record_menu_click(
                &self.host,
                &RawMenuAction {
                    action_name: String::from("CC_OP"),
                    option: String::from("Withdraw-5"),
                    target: String::from("<col=ff9040>Logs</col>"),
                    id: 1511,
                    open_menu_entries: 2,
                },
                Utc::now(),
            );
        } else {
            self.host.set_visible_widget_groups(vec![12, 149]);
        }
    }
}

impl Default for DemoSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_core::config::QueueConfig;
    use ticklens_host::HostState as _;
    use ticklens_types::ids::SessionId;

    use super::*;

    #[test]
    fn script_moves_the_actor() {
        let session = SessionContext::new(SessionId::new(), &QueueConfig::default(), Utc::now());
        let mut demo = DemoSession::new();
        let before = demo.host().local_actor().unwrap().position;
        demo.advance(&session);
        let after = demo.host().local_actor().unwrap().position;
        assert_ne!(before, after);
    }

    #[test]
    fn bank_step_opens_the_overlay_and_stores_a_method() {
        let session = SessionContext::new(SessionId::new(), &QueueConfig::default(), Utc::now());
        let mut demo = DemoSession::new();
        for _ in 0..8 {
            demo.advance(&session);
        }
        assert!(demo.host().widget_visible(213));
        assert_eq!(
            session
                .last_banking_method(ticklens_types::enums::BankAction::Withdraw)
                .as_deref(),
            Some("5")
        );
    }
}
