//! Configuration file structures for the xr-bridge.
//!
//! This module defines structures for TOML configuration files:
//! - [`ConfigFile`]: Top-level configuration file structure
//! - [`SimulationConfig`]: Settings for the headless simulated application

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::BridgeConfig;

/// Environment variable naming a configuration file for the JNI library.
pub const CONFIG_ENV_VAR: &str = "XR_BRIDGE_CONFIG";

/// Top-level configuration file structure.
///
/// # Example
///
/// ```toml
/// [bridge.registry]
/// max_instances = 4
///
/// [bridge.lifecycle]
/// init_failure = "keep"
///
/// [bridge.jni]
/// exception_class = "java/lang/IllegalArgumentException"
///
/// [bridge.logging]
/// filter = "debug"
/// json = true
///
/// [simulation]
/// server_address = "192.168.1.20"
/// planes_after_frames = 30
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Bridge configuration.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Simulated application configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ConfigFile {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!(path = %path.display(), "Configuration file read");

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            message: e.to_string(),
        })
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but the file cannot be loaded.
    pub fn from_env() -> Result<Self, ConfigFileError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Settings for the simulated application used by tests and the CLI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Server address reported before any launch option overrides it.
    #[serde(default = "defaults::server_address")]
    pub server_address: String,

    /// Number of drawn frames after which planes count as detected.
    #[serde(default = "defaults::planes_after_frames")]
    pub planes_after_frames: u32,

    /// Status returned by `init`. Zero means success.
    #[serde(default)]
    pub init_status: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            server_address: defaults::server_address(),
            planes_after_frames: defaults::planes_after_frames(),
            init_status: 0,
        }
    }
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}

/// Default value functions for serde.
mod defaults {
    pub fn server_address() -> String {
        "127.0.0.1".to_string()
    }

    pub const fn planes_after_frames() -> u32 {
        30
    }
}
