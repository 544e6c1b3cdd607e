//! Per-call view of the JNI environment.

use jni::JNIEnv;
use jni::objects::{JObject, JString};
use jni::sys::jstring;
use tracing::{error, warn};

use xr_bridge_common::{BridgeError, MarshalError};
use xr_bridge_core::{AssetSource, OpaqueRef, ResumeTarget};

use crate::ffi;

/// Wraps the environment the VM passed to an entry point and does the
/// argument and result marshaling for it.
pub struct JniContext<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
}

impl<'a, 'local> JniContext<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>) -> Self {
        Self { env }
    }

    pub fn env(&mut self) -> &mut JNIEnv<'local> {
        self.env
    }

    /// Copy a Java string into Rust.
    ///
    /// Returns `None` for a null reference or when the VM cannot provide the
    /// characters; callers treat both as an empty string.
    pub fn read_string(&mut self, value: &JString<'_>) -> Option<String> {
        if value.is_null() {
            return None;
        }

        match self.env.get_string(value) {
            Ok(text) => Some(text.into()),
            Err(e) => {
                let err = MarshalError::string_read(e.to_string());
                warn!(error = %err, "Treating unreadable string as empty");
                None
            }
        }
    }

    /// Create a new Java string and hand ownership of the local reference
    /// to the caller.
    pub fn new_string(&mut self, text: &str) -> Result<jstring, BridgeError> {
        let value = self
            .env
            .new_string(text)
            .map_err(|e| MarshalError::string_create(e.to_string()))?;
        Ok(value.into_raw())
    }

    /// The native asset manager behind a Java `AssetManager`.
    pub fn asset_source(&mut self, asset_manager: &JObject<'_>) -> AssetSource {
        AssetSource(ffi::asset_manager_from_java(
            self.env.get_raw(),
            asset_manager.as_raw(),
        ))
    }

    /// Raw references forwarded to `on_resume`, valid for the current call.
    pub fn resume_target(&mut self, context: &JObject<'_>, activity: &JObject<'_>) -> ResumeTarget {
        ResumeTarget {
            env: OpaqueRef::from_ptr(self.env.get_raw()),
            context: OpaqueRef::from_ptr(context.as_raw()),
            activity: OpaqueRef::from_ptr(activity.as_raw()),
        }
    }

    /// Raise a Java exception unless one is already pending.
    pub fn throw(&mut self, class: &str, message: &str) {
        if self.env.exception_check().unwrap_or(false) {
            return;
        }
        if let Err(e) = self.env.throw_new(class, message) {
            error!(class, error = %e, "Failed to raise Java exception");
        }
    }
}

impl std::fmt::Debug for JniContext<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JniContext").finish_non_exhaustive()
    }
}
