//! Configuration structures for the xr-bridge.
//!
//! This module defines configuration options for the bridge components:
//! - [`BridgeConfig`]: Top-level configuration containing all settings
//! - [`RegistryConfig`]: Handle registry limits
//! - [`LifecycleConfig`]: How application initialization failures are treated
//! - [`JniConfig`]: How rejected calls are reported to the JVM
//! - [`LoggingConfig`]: Tracing subscriber settings

use serde::{Deserialize, Serialize};

/// Top-level bridge configuration.
///
/// Every section is optional; unspecified fields fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Handle registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Application lifecycle configuration.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// JNI boundary configuration.
    #[serde(default)]
    pub jni: JniConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Handle registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Maximum number of live applications.
    ///
    /// A real device hosts one application per activity, so this only
    /// guards against leaked handles piling up.
    #[serde(default = "defaults::max_instances")]
    pub max_instances: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_instances: defaults::max_instances(),
        }
    }
}

/// What to do when the application's init step reports a non-zero status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InitFailurePolicy {
    /// Drop the instance and hand the caller the null handle.
    #[default]
    Reject,
    /// Keep the instance and return its handle; the status is only logged.
    Keep,
}

/// Application lifecycle configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Policy applied when `init` returns a failure status.
    #[serde(default)]
    pub init_failure: InitFailurePolicy,
}

/// JNI boundary configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JniConfig {
    /// Binary name of the exception class thrown for rejected calls.
    #[serde(default = "defaults::exception_class")]
    pub exception_class: String,

    /// Binary name of the exception class thrown when the application panics.
    #[serde(default = "defaults::panic_class")]
    pub panic_class: String,
}

impl Default for JniConfig {
    fn default() -> Self {
        Self {
            exception_class: defaults::exception_class(),
            panic_class: defaults::panic_class(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directives in `EnvFilter` syntax. `RUST_LOG` takes precedence.
    #[serde(default = "defaults::log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: defaults::log_filter(),
            json: false,
        }
    }
}

/// Default value functions for serde.
mod defaults {
    pub const fn max_instances() -> u32 {
        16
    }

    pub fn exception_class() -> String {
        "java/lang/IllegalStateException".to_string()
    }

    pub fn panic_class() -> String {
        "java/lang/RuntimeException".to_string()
    }

    pub fn log_filter() -> String {
        "info,xr_bridge=debug".to_string()
    }
}
