//! In-memory scriptable host used by tests and the engine demo.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use ticklens_types::events::InventorySlot;
use ticklens_types::records::CameraPose;

use crate::{HostError, HostState, InputCounters, LocalActor, SceneActor};

/// Mutable world state behind the stub's lock.
#[derive(Debug, Default)]
struct StubWorld {
    local_actor: Option<LocalActor>,
    mouse: Option<(i32, i32)>,
    camera: Option<CameraPose>,
    last_menu_option: Option<String>,
    visible_widget_groups: Vec<u32>,
    item_names: BTreeMap<i32, String>,
    object_names: BTreeMap<i32, String>,
    npc_names: BTreeMap<i32, String>,
    failing_ids: BTreeSet<i32>,
    players: Vec<SceneActor>,
    npcs: Vec<SceneActor>,
    inventory: Vec<InventorySlot>,
    equipment: Vec<i32>,
}

/// A scriptable [`HostState`] + [`InputCounters`] implementation.
///
/// Every setter takes `&self`; tests mutate the stub mid-scenario
/// without threading `&mut` through the orchestrator. Ids added via
/// [`fail_lookup`] make every name query for that id return
/// [`HostError::Lookup`], which exercises the defensive fallback
/// paths.
///
/// [`fail_lookup`]: StubHost::fail_lookup
#[derive(Debug, Default)]
pub struct StubHost {
    world: Mutex<StubWorld>,
    key_presses: AtomicU32,
}

impl StubHost {
    /// Create an empty stub: logged out, nothing visible.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_world<R>(&self, f: impl FnOnce(&mut StubWorld) -> R) -> R {
        // A poisoned lock only means another test thread panicked; the
        // state itself is still usable.
        let mut guard = self.world.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Place (or replace) the local actor.
    pub fn set_local_actor(&self, actor: LocalActor) {
        self.with_world(|w| w.local_actor = Some(actor));
    }

    /// Move the mouse to a canvas position.
    pub fn set_mouse(&self, x: i32, y: i32) {
        self.with_world(|w| w.mouse = Some((x, y)));
    }

    /// Set the camera pose.
    pub fn set_camera(&self, pose: CameraPose) {
        self.with_world(|w| w.camera = Some(pose));
    }

    /// Set the most recent menu option text.
    pub fn set_last_menu_option(&self, option: impl Into<String>) {
        self.with_world(|w| w.last_menu_option = Some(option.into()));
    }

    /// Replace the visible root widget groups (scan order preserved).
    pub fn set_visible_widget_groups(&self, groups: Vec<u32>) {
        self.with_world(|w| w.visible_widget_groups = groups);
    }

    /// Register an item display name.
    pub fn add_item_name(&self, id: i32, name: impl Into<String>) {
        self.with_world(|w| {
            w.item_names.insert(id, name.into());
        });
    }

    /// Register a scene-object display name.
    pub fn add_object_name(&self, id: i32, name: impl Into<String>) {
        self.with_world(|w| {
            w.object_names.insert(id, name.into());
        });
    }

    /// Register an NPC display name.
    pub fn add_npc_name(&self, id: i32, name: impl Into<String>) {
        self.with_world(|w| {
            w.npc_names.insert(id, name.into());
        });
    }

    /// Make every name lookup for `id` fail with [`HostError::Lookup`].
    pub fn fail_lookup(&self, id: i32) {
        self.with_world(|w| {
            w.failing_ids.insert(id);
        });
    }

    /// Replace the scene player list.
    pub fn set_scene_players(&self, players: Vec<SceneActor>) {
        self.with_world(|w| w.players = players);
    }

    /// Replace the scene NPC list.
    pub fn set_scene_npcs(&self, npcs: Vec<SceneActor>) {
        self.with_world(|w| w.npcs = npcs);
    }

    /// Replace the inventory contents.
    pub fn set_inventory(&self, slots: Vec<InventorySlot>) {
        self.with_world(|w| w.inventory = slots);
    }

    /// Replace the worn equipment ids.
    pub fn set_equipment(&self, ids: Vec<i32>) {
        self.with_world(|w| w.equipment = ids);
    }

    /// Record key presses as the host's keyboard listener would.
    pub fn press_keys(&self, count: u32) {
        self.key_presses.fetch_add(count, Ordering::Relaxed);
    }

    fn lookup(
        &self,
        id: i32,
        table: impl FnOnce(&StubWorld) -> Option<String>,
    ) -> Result<Option<String>, HostError> {
        self.with_world(|w| {
            if w.failing_ids.contains(&id) {
                return Err(HostError::Lookup {
                    id,
                    message: String::from("scripted failure"),
                });
            }
            Ok(table(w))
        })
    }
}

impl HostState for StubHost {
    fn local_actor(&self) -> Option<LocalActor> {
        self.with_world(|w| w.local_actor.clone())
    }

    fn mouse_position(&self) -> Option<(i32, i32)> {
        self.with_world(|w| w.mouse)
    }

    fn camera_pose(&self) -> Option<CameraPose> {
        self.with_world(|w| w.camera)
    }

    fn last_menu_option(&self) -> Option<String> {
        self.with_world(|w| w.last_menu_option.clone())
    }

    fn visible_widget_groups(&self) -> Vec<u32> {
        self.with_world(|w| w.visible_widget_groups.clone())
    }

    fn widget_visible(&self, group: u32) -> bool {
        self.with_world(|w| w.visible_widget_groups.contains(&group))
    }

    fn item_name(&self, id: i32) -> Result<Option<String>, HostError> {
        self.lookup(id, |w| w.item_names.get(&id).cloned())
    }

    fn object_name(&self, id: i32) -> Result<Option<String>, HostError> {
        self.lookup(id, |w| w.object_names.get(&id).cloned())
    }

    fn npc_name(&self, id: i32) -> Result<Option<String>, HostError> {
        self.lookup(id, |w| w.npc_names.get(&id).cloned())
    }

    fn scene_players(&self) -> Vec<SceneActor> {
        self.with_world(|w| w.players.clone())
    }

    fn scene_npcs(&self) -> Vec<SceneActor> {
        self.with_world(|w| w.npcs.clone())
    }

    fn inventory_slots(&self) -> Vec<InventorySlot> {
        self.with_world(|w| w.inventory.clone())
    }

    fn equipment_item_ids(&self) -> Vec<i32> {
        self.with_world(|w| w.equipment.clone())
    }
}

impl InputCounters for StubHost {
    fn take_key_press_count(&self) -> u32 {
        self.key_presses.swap(0, Ordering::Relaxed)
    }
}
