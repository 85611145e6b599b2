//! Shared types for the Ticklens telemetry engine.
//!
//! This crate defines the vocabulary every other crate speaks:
//!
//! - [`ids`] -- strongly-typed session identifier.
//! - [`enums`] -- closed enumerations for click targets, interface kinds,
//!   chat categories, and banking actions.
//! - [`point`] -- world tile coordinates and distance math.
//! - [`events`] -- payloads pushed from host callbacks into the bounded
//!   queues between ticks.
//! - [`records`] -- the per-domain sub-records a tick snapshot aggregates.
//! - [`snapshot`] -- the [`TickSnapshot`] itself with validity and
//!   footprint derivations.
//!
//! [`TickSnapshot`]: snapshot::TickSnapshot

pub mod enums;
pub mod events;
pub mod ids;
pub mod point;
pub mod records;
pub mod snapshot;

pub use enums::{BankAction, ChatCategory, ClickKind, InterfaceKind, TargetType};
pub use events::{
    AnimationEvent, BankingClickEvent, ChatEvent, ClickContext, HitsplatEvent,
    InteractionEvent, InventoryChangeEvent, InventorySlot,
};
pub use ids::SessionId;
pub use point::TilePoint;
pub use records::{
    AnalysisRecord, CameraPose, CombatRecord, InputRecord, InterfaceRecord, PlayerRecord,
    SocialRecord, SystemRecord, WorldRecord,
};
pub use snapshot::TickSnapshot;
