//! Bodies of the exported JNI functions.
//!
//! Each `Java_..._JniInterface_*` symbol generated by
//! [`jni_interface!`](crate::jni_interface) calls exactly one function here.
//! The functions decode the handle, marshal arguments, forward to the
//! [`Bridge`] and translate failures into Java exceptions:
//!
//! - invalid, stale or destroyed handles raise the configured
//!   `exception_class` and return the type's default value
//! - a panic in the application raises `panic_class`
//! - `createNativeApplication` never raises for a failed construction; it
//!   returns `0`

use std::any::Any;
use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};

use jni::objects::{JObject, JString};
use jni::sys::{
    JNI_ERR, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6, jboolean, jclass, jfloat, jint, jlong, jstring,
};
use jni::{JNIEnv, JavaVM};
use tracing::{error, info, warn};

use xr_bridge_common::{BridgeError, ConfigFile, JniConfig};
use xr_bridge_core::{AppHandle, ApplicationFactory, Bridge, DisplayGeometry, NULL_RAW, TouchEvent};

use crate::context::JniContext;
use crate::{jvm, logging, runtime};

/// Fully qualified name of the Java class declaring the native methods.
pub const JAVA_CLASS: &str = "com/nvidia/ar/hellocloudxr/JniInterface";

/// Load-time setup: configuration, logging, and the bridge runtime.
///
/// Returns the JNI version the library needs, or `JNI_ERR` when `vm` is
/// unusable or building the factory panics. A failed load leaves the runtime
/// uninstalled.
///
/// # Safety
///
/// `vm` must be the pointer the VM passed to `JNI_OnLoad`.
#[allow(unsafe_code)]
pub unsafe fn on_load<F>(vm: *mut jni::sys::JavaVM, factory: F) -> jint
where
    F: FnOnce(&ConfigFile) -> Box<dyn ApplicationFactory>,
{
    // SAFETY: valid VM pointer per the caller's contract.
    let Ok(vm) = (unsafe { JavaVM::from_raw(vm) }) else {
        return JNI_ERR;
    };

    let (file, load_error) = match ConfigFile::from_env() {
        Ok(file) => (file, None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };
    logging::init(&file.bridge.logging);
    if let Some(e) = load_error {
        warn!(error = %e, "Falling back to default configuration");
    }

    let installed = panic::catch_unwind(AssertUnwindSafe(|| {
        runtime::install(vm, file.bridge.clone(), || factory(&file));
    }));
    if let Err(payload) = installed {
        let message = panic_message(payload.as_ref());
        error!(panic = message, "Application factory panicked during load");
        return JNI_ERR;
    }
    info!(class = JAVA_CLASS, "Native library loaded");
    JNI_VERSION_1_6
}

pub fn create_native_application(
    mut env: JNIEnv<'_>,
    asset_manager: &JObject<'_>,
    external_dir: &JString<'_>,
) -> jlong {
    boundary(&mut env, "createNativeApplication", NULL_RAW, |cx, bridge| {
        let assets = cx.asset_source(asset_manager);
        let external_dir = cx.read_string(external_dir);

        match bridge.create(assets, external_dir.as_deref()) {
            Ok(handle) => Ok(handle.to_raw()),
            Err(e) => {
                error!(error = %e, "Application not created");
                Ok(NULL_RAW)
            }
        }
    })
}

pub fn destroy_native_application(mut env: JNIEnv<'_>, handle: jlong) {
    boundary(&mut env, "destroyNativeApplication", (), |_, bridge| {
        bridge.destroy(AppHandle::try_from(handle)?)
    });
}

pub fn on_pause(mut env: JNIEnv<'_>, handle: jlong) {
    boundary(&mut env, "onPause", (), |_, bridge| {
        bridge.pause(AppHandle::try_from(handle)?)
    });
}

pub fn on_resume(
    mut env: JNIEnv<'_>,
    handle: jlong,
    context: &JObject<'_>,
    activity: &JObject<'_>,
) {
    boundary(&mut env, "onResume", (), |cx, bridge| {
        let handle = AppHandle::try_from(handle)?;
        bridge.resume(handle, cx.resume_target(context, activity))
    });
}

pub fn handle_launch_options(mut env: JNIEnv<'_>, handle: jlong, options: &JString<'_>) {
    boundary(&mut env, "handleLaunchOptions", (), |cx, bridge| {
        let handle = AppHandle::try_from(handle)?;
        let options = cx.read_string(options);
        bridge.handle_launch_options(handle, options.as_deref())
    });
}

pub fn set_args(mut env: JNIEnv<'_>, handle: jlong, args: &JString<'_>) {
    boundary(&mut env, "setArgs", (), |cx, bridge| {
        let handle = AppHandle::try_from(handle)?;
        let args = cx.read_string(args);
        bridge.set_args(handle, args.as_deref())
    });
}

pub fn get_server_ip(mut env: JNIEnv<'_>, handle: jlong) -> jstring {
    boundary(&mut env, "getServerIp", std::ptr::null_mut(), |cx, bridge| {
        let address = bridge.server_address(AppHandle::try_from(handle)?)?;
        cx.new_string(&address)
    })
}

pub fn on_gl_surface_created(mut env: JNIEnv<'_>, handle: jlong) {
    boundary(&mut env, "onGlSurfaceCreated", (), |_, bridge| {
        bridge.surface_created(AppHandle::try_from(handle)?)
    });
}

pub fn on_display_geometry_changed(
    mut env: JNIEnv<'_>,
    handle: jlong,
    rotation: jint,
    width: jint,
    height: jint,
) {
    boundary(&mut env, "onDisplayGeometryChanged", (), |_, bridge| {
        let geometry = DisplayGeometry {
            rotation,
            width,
            height,
        };
        bridge.display_geometry_changed(AppHandle::try_from(handle)?, geometry)
    });
}

pub fn on_gl_surface_draw_frame(mut env: JNIEnv<'_>, handle: jlong) -> jint {
    boundary(&mut env, "onGlSurfaceDrawFrame", 0, |_, bridge| {
        let status = bridge.draw_frame(AppHandle::try_from(handle)?)?;
        Ok(status.code())
    })
}

pub fn on_touched(mut env: JNIEnv<'_>, handle: jlong, x: jfloat, y: jfloat, long_press: jboolean) {
    boundary(&mut env, "onTouched", (), |_, bridge| {
        let touch = TouchEvent {
            x,
            y,
            long_press: from_jboolean(long_press),
        };
        bridge.touched(AppHandle::try_from(handle)?, touch)
    });
}

pub fn has_detected_planes(mut env: JNIEnv<'_>, handle: jlong) -> jboolean {
    boundary(&mut env, "hasDetectedPlanes", JNI_FALSE, |_, bridge| {
        let detected = bridge.has_detected_planes(AppHandle::try_from(handle)?)?;
        Ok(to_jboolean(detected))
    })
}

/// Body of the exported `GetJniEnv` helper.
pub fn get_jni_env() -> *mut jni::sys::JNIEnv {
    match jvm::attach_current_thread() {
        Ok(env) => env.get_raw(),
        Err(e) => {
            error!(error = %e, "GetJniEnv failed");
            std::ptr::null_mut()
        }
    }
}

/// Body of the exported `FindClass` helper.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[allow(unsafe_code)]
pub unsafe fn find_class(name: *const c_char) -> jclass {
    if name.is_null() {
        return std::ptr::null_mut();
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let name = unsafe { CStr::from_ptr(name) };

    let Ok(name) = name.to_str() else {
        warn!(name = ?name, "FindClass name is not UTF-8");
        return std::ptr::null_mut();
    };

    match jvm::find_class(name) {
        Ok(class) => class,
        Err(e) => {
            warn!(name, error = %e, "FindClass failed");
            std::ptr::null_mut()
        }
    }
}

/// Run one entry point body with handle errors and panics mapped to Java
/// exceptions.
fn boundary<'local, R, F>(env: &mut JNIEnv<'local>, op: &'static str, fallback: R, body: F) -> R
where
    F: FnOnce(&mut JniContext<'_, 'local>, &Bridge) -> Result<R, BridgeError>,
{
    let mut cx = JniContext::new(env);
    let runtime = match runtime::get() {
        Ok(runtime) => runtime,
        Err(e) => {
            let config = JniConfig::default();
            cx.throw(&config.exception_class, &e.to_string());
            return fallback;
        }
    };
    let config = &runtime.config().jni;

    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut cx, runtime.bridge()))) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(op, error = %e, "Call rejected");
            cx.throw(&config.exception_class, &format!("{op}: {e}"));
            fallback
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(op, panic = message, "Native application panicked");
            cx.throw(&config.panic_class, &format!("{op}: {message}"));
            fallback
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

pub fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

pub fn from_jboolean(value: jboolean) -> bool {
    value != JNI_FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jboolean_conversion() {
        assert_eq!(to_jboolean(true), JNI_TRUE);
        assert_eq!(to_jboolean(false), JNI_FALSE);
        assert!(from_jboolean(JNI_TRUE));
        assert!(from_jboolean(2));
        assert!(!from_jboolean(JNI_FALSE));
    }

    #[test]
    fn test_panic_message_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(payload.as_ref()), "owned message");

        let payload: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_caught_panic_message() {
        let payload = panic::catch_unwind(|| panic!("draw exploded")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "draw exploded");
    }

    #[test]
    fn test_find_class_null_name() {
        #[allow(unsafe_code)]
        let class = unsafe { find_class(std::ptr::null()) };
        assert!(class.is_null());
    }

    #[test]
    fn test_java_class_name_matches_symbols() {
        assert_eq!(
            JAVA_CLASS.replace('/', "_"),
            "com_nvidia_ar_hellocloudxr_JniInterface"
        );
    }
}
