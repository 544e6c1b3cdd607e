//! Process-wide bridge runtime.
//!
//! The JVM only hands native code a `long` per application, so the registry
//! those longs index into must be reachable without a receiver object.
//! [`BridgeRuntime`] is installed exactly once, from `JNI_OnLoad`, and lives
//! for the rest of the process.

use std::sync::OnceLock;

use jni::JavaVM;
use tracing::{info, warn};

use xr_bridge_common::{BridgeConfig, BridgeError};
use xr_bridge_core::{ApplicationFactory, Bridge};

static RUNTIME: OnceLock<BridgeRuntime> = OnceLock::new();

/// The Java VM, the loaded configuration, and the bridge.
pub struct BridgeRuntime {
    vm: JavaVM,
    config: BridgeConfig,
    bridge: Bridge,
}

impl BridgeRuntime {
    /// The VM the library was loaded into.
    pub fn vm(&self) -> &JavaVM {
        &self.vm
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}

impl std::fmt::Debug for BridgeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeRuntime")
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}

/// Install the runtime. The factory is only built on the first call; later
/// calls keep the existing runtime and return it.
pub fn install(
    vm: JavaVM,
    config: BridgeConfig,
    factory: impl FnOnce() -> Box<dyn ApplicationFactory>,
) -> &'static BridgeRuntime {
    let mut installed = false;
    let runtime = RUNTIME.get_or_init(|| {
        installed = true;
        let bridge = Bridge::new(factory(), &config);
        BridgeRuntime { vm, config, bridge }
    });

    if installed {
        info!(
            max_instances = runtime.config.registry.max_instances,
            init_failure = ?runtime.config.lifecycle.init_failure,
            "Bridge runtime installed"
        );
    } else {
        warn!("Bridge runtime already installed, keeping the existing one");
    }
    runtime
}

/// The installed runtime.
///
/// # Errors
///
/// Returns [`BridgeError::NotLoaded`] before `JNI_OnLoad` has run.
pub fn get() -> Result<&'static BridgeRuntime, BridgeError> {
    RUNTIME.get().ok_or(BridgeError::NotLoaded)
}
