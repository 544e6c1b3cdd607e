//! JNI entry points for xr-bridge.
//!
//! A `cdylib` exports the JVM-facing symbols with one macro invocation:
//!
//! ```ignore
//! xr_bridge_jni::jni_interface!(|config: &xr_bridge_jni::ConfigFile| {
//!     MyFactory::new(config)
//! });
//! ```
//!
//! `JNI_OnLoad` reads the configuration file named by `XR_BRIDGE_CONFIG`,
//! installs the tracing subscriber, and builds the process-wide
//! [`runtime::BridgeRuntime`]. Every `Java_..._JniInterface_*` symbol then
//! forwards to the matching function in [`entry`].

pub mod context;
pub mod entry;
pub mod jvm;
pub mod logging;
mod macros;
pub mod runtime;

mod ffi;

pub use jni;

pub use context::JniContext;
pub use entry::JAVA_CLASS;
pub use xr_bridge_common::ConfigFile;
pub use xr_bridge_core::{ApplicationFactory, SimulatedFactory};
