//! Common types, errors, and configuration for xr-bridge.
//!
//! This crate provides shared functionality used across the xr-bridge workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures for the bridge and its simulated application
//! - TOML configuration file loading

pub mod config;
pub mod config_file;
pub mod error;

pub use config::{
    BridgeConfig, InitFailurePolicy, JniConfig, LifecycleConfig, LoggingConfig, RegistryConfig,
};
pub use config_file::{CONFIG_ENV_VAR, ConfigFile, ConfigFileError, SimulationConfig};
pub use error::{BridgeError, MarshalError};
