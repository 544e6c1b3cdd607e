//! NDK symbols used by the bridge.

use jni::sys::{JNIEnv, jobject};
use xr_bridge_core::OpaqueRef;

#[cfg(target_os = "android")]
#[link(name = "android")]
unsafe extern "C" {
    fn AAssetManager_fromJava(env: *mut JNIEnv, asset_manager: jobject) -> *mut std::ffi::c_void;
}

/// Resolve a Java `AssetManager` into the native `AAssetManager*`.
///
/// Off Android there is no native asset manager, so the Java reference
/// itself is passed through.
#[allow(unsafe_code)]
pub fn asset_manager_from_java(env: *mut JNIEnv, asset_manager: jobject) -> OpaqueRef {
    if asset_manager.is_null() {
        return OpaqueRef::null();
    }

    #[cfg(target_os = "android")]
    {
        // SAFETY: `env` is the calling thread's environment and
        // `asset_manager` is a live local reference passed in by the VM.
        OpaqueRef::from_ptr(unsafe { AAssetManager_fromJava(env, asset_manager) })
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = env;
        OpaqueRef::from_ptr(asset_manager)
    }
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;

    #[test]
    fn test_null_manager_stays_null() {
        let resolved = asset_manager_from_java(std::ptr::null_mut(), std::ptr::null_mut());
        assert!(resolved.is_null());
    }

    #[test]
    fn test_host_passes_reference_through() {
        let mut object = 0_u8;
        let raw: jobject = std::ptr::from_mut(&mut object).cast();

        let resolved = asset_manager_from_java(std::ptr::null_mut(), raw);
        assert_eq!(resolved.as_ptr::<std::ffi::c_void>(), raw.cast::<std::ffi::c_void>());
    }
}
