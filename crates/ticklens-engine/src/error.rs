//! Engine-level error type.

use ticklens_core::config::ConfigError;
use ticklens_core::orchestrator::OrchestratorError;

/// Errors that can abort the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The orchestrator refused a tick.
    #[error("orchestrator error: {source}")]
    Orchestrator {
        /// The underlying orchestrator error.
        #[from]
        source: OrchestratorError,
    },
}
