//! Access to the VM from threads the JVM did not call in on.
//!
//! Streaming and decoding threads owned by the native application need a
//! `JNIEnv` of their own. They attach permanently: the thread stays attached
//! until it exits.

use jni::JNIEnv;
use jni::objects::JObject;
use jni::sys::jclass;
use tracing::debug;

use xr_bridge_common::{BridgeError, MarshalError};

use crate::runtime;

/// Attach the current thread to the VM, or return its existing environment.
pub fn attach_current_thread() -> Result<JNIEnv<'static>, BridgeError> {
    let runtime = runtime::get()?;
    let env = runtime
        .vm()
        .attach_current_thread_permanently()
        .map_err(|e| MarshalError::jni(format!("attach failed: {e}")))?;
    debug!("Thread attached to VM");
    Ok(env)
}

/// Look up a class by its slash-separated name on the current thread.
///
/// The result is a local reference owned by the caller.
pub fn find_class(name: &str) -> Result<jclass, BridgeError> {
    let mut env = attach_current_thread()?;
    let class = env
        .find_class(name)
        .map_err(|e| MarshalError::jni(format!("class {name} not found: {e}")))?;
    Ok(JObject::from(class).into_raw())
}
