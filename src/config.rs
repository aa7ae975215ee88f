//! Exporter configuration.
//!
//! The device roster comes from a small YAML file:
//!
//! ```yaml
//! nodes:
//!   - 10.0.0.5
//!   - ntp1.example.net
//! poll_timeout_ms: 3000   # optional
//! cycle_timeout_ms: 5000  # optional
//! port: 123               # optional
//! ```
//!
//! The roster is loaded once at startup and treated as immutable for the
//! process lifetime. Entries may carry an explicit `host:port` suffix;
//! otherwise `port` applies.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::protocol::NTP_PORT;

/// Default per-poll deadline in milliseconds.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 3_000;

/// Default cycle ceiling in milliseconds.
pub const DEFAULT_CYCLE_TIMEOUT_MS: u64 = 5_000;

/// Parsed exporter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Ordered device roster (IPs or hostnames).
    pub nodes: Vec<String>,
    /// Per-poll deadline in milliseconds.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// Whole-cycle ceiling in milliseconds.
    #[serde(default = "default_cycle_timeout_ms")]
    pub cycle_timeout_ms: u64,
    /// Device status port for roster entries without an explicit port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_poll_timeout_ms() -> u64 {
    DEFAULT_POLL_TIMEOUT_MS
}

fn default_cycle_timeout_ms() -> u64 {
    DEFAULT_CYCLE_TIMEOUT_MS
}

fn default_port() -> u16 {
    NTP_PORT
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read, is not valid
    /// YAML, or describes an unusable roster.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (index, host) in self.nodes.iter().enumerate() {
            if host.trim().is_empty() {
                return Err(ConfigError::EmptyHost { index });
            }
        }
        Ok(())
    }

    /// Per-poll deadline as a [`Duration`].
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Cycle ceiling as a [`Duration`].
    #[must_use]
    pub fn cycle_timeout(&self) -> Duration {
        Duration::from_millis(self.cycle_timeout_ms)
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid YAML for this schema.
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The roster has no entries.
    #[error("device roster is empty")]
    EmptyRoster,

    /// A roster entry is an empty string.
    #[error("device roster entry {index} is empty")]
    EmptyHost {
        /// Zero-based roster index.
        index: usize,
    },
}
