//! Tick aggregation engine for the Ticklens telemetry system.
//!
//! This crate turns asynchronous host callbacks and synchronous host
//! state into one validated [`TickSnapshot`] per tick:
//!
//! - [`queue`] -- bounded drop-oldest event queues and the pending
//!   click slot bridging callback threads to the tick thread.
//! - [`resolve`] -- the defensive name/id fallback chain and the
//!   inventory JSON projection.
//! - [`analytics`] -- movement, mouse-idle, and read-and-reset
//!   counters carried across ticks.
//! - [`click`] -- menu-action classification into the target taxonomy.
//! - [`session`] -- the per-session context shared with host
//!   callbacks.
//! - [`config`] -- YAML configuration with defaults.
//! - [`collectors`] -- the seven domain collectors.
//! - [`orchestrator`] -- fixed-order sequencing, failure isolation,
//!   timing, validation, and shutdown.
//!
//! [`TickSnapshot`]: ticklens_types::snapshot::TickSnapshot

pub mod analytics;
pub mod click;
pub mod collectors;
pub mod config;
pub mod orchestrator;
pub mod queue;
pub mod resolve;
pub mod session;

pub use config::TelemetryConfig;
pub use orchestrator::{Orchestrator, OrchestratorError};
pub use session::SessionContext;
