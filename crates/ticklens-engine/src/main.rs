//! Capture engine binary for the Ticklens telemetry system.
//!
//! Wires together configuration, the session context, the demo host,
//! the tick orchestrator, and the snapshot sink, then runs the tick
//! loop until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ticklens-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the session context and orchestrator
//! 4. Seed the scripted demo session
//! 5. Run the tick loop at the configured interval
//! 6. On ctrl-c, shut the orchestrator down and exit

mod demo;
mod error;
mod sink;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ticklens_core::config::TelemetryConfig;
use ticklens_core::orchestrator::{Orchestrator, OrchestratorError};
use ticklens_core::session::SessionContext;
use ticklens_types::ids::SessionId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::demo::DemoSession;
use crate::error::EngineError;
use crate::sink::{LogSink, SnapshotSink as _};

/// Application entry point for the capture engine.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the tick loop
/// aborts.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging, which needs the filter).
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone())),
        )
        .with_target(true)
        .init();

    info!("ticklens-engine starting");
    info!(
        tick_interval_ms = config.session.tick_interval_ms,
        chat_capacity = config.queues.chat_capacity,
        inventory_capacity = config.queues.inventory_capacity,
        "Configuration loaded"
    );

    // 3. Create the session context and orchestrator.
    let session_id = SessionId::new();
    let session = Arc::new(SessionContext::new(session_id, &config.queues, Utc::now()));
    let tick_interval = Duration::from_millis(config.session.tick_interval_ms);
    let mut orchestrator = Orchestrator::new(Arc::clone(&session), config);
    info!(%session_id, "Session started");

    // 4. Seed the scripted demo session.
    let mut demo = DemoSession::new();
    let mut sink = LogSink::new();

    // 5. Run the tick loop until ctrl-c.
    let mut ticker = tokio::time::interval(tick_interval);
    let mut tick_number = 0_u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick_number = tick_number.saturating_add(1);
                demo.advance(&session);

                let host = demo.host();
                match orchestrator.build_snapshot(host, host, tick_number) {
                    Ok(snapshot) => sink.accept(&snapshot),
                    Err(err @ OrchestratorError::ShutDown) => {
                        return Err(EngineError::from(err).into());
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, shutting down");
                break;
            }
        }
    }

    // 6. Shut down.
    orchestrator.shutdown();
    info!(
        ticks = tick_number,
        invalid_snapshots = sink.invalid_seen(),
        "ticklens-engine shutdown complete"
    );

    Ok(())
}

/// Load the telemetry configuration from `ticklens-config.yaml`.
///
/// Looks for the config file relative to the current working
/// directory; a missing file means defaults.
fn load_config() -> Result<TelemetryConfig, EngineError> {
    let config_path = Path::new("ticklens-config.yaml");
    if config_path.exists() {
        let config = TelemetryConfig::from_file(config_path)?;
        Ok(config)
    } else {
        Ok(TelemetryConfig::default())
    }
}
