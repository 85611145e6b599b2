//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `ticklens-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring
//! the YAML structure and a loader that reads and validates the file.
//! Every section defaults to the values the collectors were tuned
//! against, so a missing file or section is never an error at the call
//! site that can fall back to `TelemetryConfig::default()`.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value failed validation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Session-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Milliseconds between ticks in the engine loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

const fn default_tick_interval_ms() -> u64 {
    600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Bounded-queue capacities, fixed per use site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueConfig {
    /// Chat message queue capacity.
    #[serde(default = "default_chat_capacity")]
    pub chat_capacity: usize,
    /// Inventory-change queue capacity.
    #[serde(default = "default_inventory_capacity")]
    pub inventory_capacity: usize,
    /// Hitsplat queue capacity.
    #[serde(default = "default_hitsplat_capacity")]
    pub hitsplat_capacity: usize,
    /// Animation-change queue capacity.
    #[serde(default = "default_animation_capacity")]
    pub animation_capacity: usize,
    /// Interaction-change queue capacity.
    #[serde(default = "default_interaction_capacity")]
    pub interaction_capacity: usize,
}

const fn default_chat_capacity() -> usize {
    100
}
const fn default_inventory_capacity() -> usize {
    50
}
const fn default_hitsplat_capacity() -> usize {
    200
}
const fn default_animation_capacity() -> usize {
    100
}
const fn default_interaction_capacity() -> usize {
    100
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            chat_capacity: default_chat_capacity(),
            inventory_capacity: default_inventory_capacity(),
            hitsplat_capacity: default_hitsplat_capacity(),
            animation_capacity: default_animation_capacity(),
            interaction_capacity: default_interaction_capacity(),
        }
    }
}

/// Social-collector settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatConfig {
    /// Drain window for chat messages in milliseconds.
    #[serde(default = "default_chat_window_ms")]
    pub window_ms: i64,
}

const fn default_chat_window_ms() -> i64 {
    300_000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            window_ms: default_chat_window_ms(),
        }
    }
}

/// Per-domain collector toggles. A disabled collector is skipped
/// entirely and its sub-record stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectorToggles {
    /// Collect the player domain.
    #[serde(default = "default_true")]
    pub player: bool,
    /// Collect the world domain.
    #[serde(default = "default_true")]
    pub world: bool,
    /// Collect the input domain.
    #[serde(default = "default_true")]
    pub input: bool,
    /// Collect the combat domain.
    #[serde(default = "default_true")]
    pub combat: bool,
    /// Collect the social domain.
    #[serde(default = "default_true")]
    pub social: bool,
    /// Collect the interface domain.
    #[serde(default = "default_true")]
    pub interface: bool,
    /// Collect the system-metrics domain.
    #[serde(default = "default_true")]
    pub system: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for CollectorToggles {
    fn default() -> Self {
        Self {
            player: true,
            world: true,
            input: true,
            combat: true,
            social: true,
            interface: true,
            system: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Tracing env-filter directive, e.g. `info` or
    /// `ticklens_core=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    String::from("info")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Top-level telemetry configuration.
///
/// Mirrors the structure of `ticklens-config.yaml`. All sections have
/// defaults matching the tuned collection behavior.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TelemetryConfig {
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Queue capacities.
    #[serde(default)]
    pub queues: QueueConfig,

    /// Chat drain settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Collector toggles.
    #[serde(default)]
    pub collectors: CollectorToggles,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TelemetryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `TICKLENS_LOG` environment variable overrides
    /// `logging.filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML,
    /// or [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        if let Ok(filter) = std::env::var("TICKLENS_LOG") {
            config.logging.filter = filter;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check value-level invariants the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("session.tick_interval_ms must be at least 1"),
            });
        }
        if self.queues.chat_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("queues.chat_capacity must be at least 1"),
            });
        }
        if self.queues.inventory_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("queues.inventory_capacity must be at least 1"),
            });
        }
        if self.chat.window_ms <= 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("chat.window_ms must be positive"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_capacities() {
        let config = TelemetryConfig::default();
        assert_eq!(config.queues.chat_capacity, 100);
        assert_eq!(config.queues.inventory_capacity, 50);
        assert_eq!(config.chat.window_ms, 300_000);
        assert_eq!(config.session.tick_interval_ms, 600);
        assert!(config.collectors.combat);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = TelemetryConfig::parse(
            "queues:\n  chat_capacity: 25\ncollectors:\n  combat: false\n",
        )
        .unwrap();
        assert_eq!(config.queues.chat_capacity, 25);
        assert_eq!(config.queues.inventory_capacity, 50);
        assert!(!config.collectors.combat);
        assert!(config.collectors.social);
    }

    #[test]
    fn empty_yaml_is_all_defaults() {
        let config = TelemetryConfig::parse("{}").unwrap();
        assert_eq!(config, {
            let mut expected = TelemetryConfig::default();
            if let Ok(filter) = std::env::var("TICKLENS_LOG") {
                expected.logging.filter = filter;
            }
            expected
        });
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let result = TelemetryConfig::parse("session:\n  tick_interval_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_chat_capacity_rejected() {
        let result = TelemetryConfig::parse("queues:\n  chat_capacity: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = TelemetryConfig::parse(": not yaml :");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
