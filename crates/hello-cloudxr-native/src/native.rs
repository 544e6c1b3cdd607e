//! The C++ application behind a C ABI.
//!
//! `libhello_ar_application.so` exports one `hello_ar_application_*`
//! function per `HelloArApplication` member. Strings cross as a
//! `(const char* data, size_t len)` pair of UTF-8 bytes, see [`StrView`];
//! embedded NULs are kept. `server_ip` copies into a caller buffer and
//! returns the full length, so the caller can retry with a larger buffer.

use std::ffi::{c_char, c_void};
use std::ptr::NonNull;

use xr_bridge_common::BridgeError;
use xr_bridge_core::{
    ApplicationFactory, ArApplication, AssetSource, DisplayGeometry, ResumeTarget, StatusCode,
    TouchEvent,
};

use crate::abi::StrView;

#[repr(C)]
struct RawApplication {
    _private: [u8; 0],
}

#[link(name = "hello_ar_application")]
unsafe extern "C" {
    fn hello_ar_application_new(
        asset_manager: *mut c_void,
        external_dir: *const c_char,
        external_dir_len: usize,
    ) -> *mut RawApplication;
    fn hello_ar_application_delete(app: *mut RawApplication);
    fn hello_ar_application_init(app: *mut RawApplication) -> i32;
    fn hello_ar_application_on_pause(app: *mut RawApplication);
    fn hello_ar_application_on_resume(
        app: *mut RawApplication,
        env: *mut c_void,
        context: *mut c_void,
        activity: *mut c_void,
    );
    fn hello_ar_application_handle_launch_options(
        app: *mut RawApplication,
        options: *const c_char,
        options_len: usize,
    );
    fn hello_ar_application_set_args(app: *mut RawApplication, args: *const c_char, args_len: usize);
    fn hello_ar_application_server_ip(
        app: *mut RawApplication,
        buffer: *mut c_char,
        capacity: usize,
    ) -> usize;
    fn hello_ar_application_on_surface_created(app: *mut RawApplication);
    fn hello_ar_application_on_display_geometry_changed(
        app: *mut RawApplication,
        rotation: i32,
        width: i32,
        height: i32,
    );
    fn hello_ar_application_on_draw_frame(app: *mut RawApplication) -> i32;
    fn hello_ar_application_on_touched(app: *mut RawApplication, x: f32, y: f32, long_press: bool);
    fn hello_ar_application_has_detected_planes(app: *mut RawApplication) -> bool;
}

/// Owns one `HelloArApplication`; deleted on drop.
pub struct NativeApplication {
    raw: NonNull<RawApplication>,
}

// The registry serializes every call on an application, so moving it to
// another thread is the only thing required.
#[allow(unsafe_code)]
unsafe impl Send for NativeApplication {}

#[allow(unsafe_code)]
impl ArApplication for NativeApplication {
    fn init(&mut self) -> StatusCode {
        StatusCode(unsafe { hello_ar_application_init(self.raw.as_ptr()) })
    }

    fn on_pause(&mut self) {
        unsafe { hello_ar_application_on_pause(self.raw.as_ptr()) }
    }

    fn on_resume(&mut self, target: ResumeTarget) {
        unsafe {
            hello_ar_application_on_resume(
                self.raw.as_ptr(),
                target.env.as_ptr(),
                target.context.as_ptr(),
                target.activity.as_ptr(),
            );
        }
    }

    fn handle_launch_options(&mut self, options: &str) {
        let options = StrView::new(options);
        unsafe {
            hello_ar_application_handle_launch_options(
                self.raw.as_ptr(),
                options.data(),
                options.len(),
            );
        }
    }

    fn set_args(&mut self, args: &str) {
        let args = StrView::new(args);
        unsafe { hello_ar_application_set_args(self.raw.as_ptr(), args.data(), args.len()) }
    }

    fn server_address(&self) -> String {
        let raw = self.raw.as_ptr();
        let len = unsafe { hello_ar_application_server_ip(raw, std::ptr::null_mut(), 0) };
        let mut buffer = vec![0_u8; len + 1];
        let written =
            unsafe { hello_ar_application_server_ip(raw, buffer.as_mut_ptr().cast(), buffer.len()) };
        buffer.truncate(written.min(len));
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn on_surface_created(&mut self) {
        unsafe { hello_ar_application_on_surface_created(self.raw.as_ptr()) }
    }

    fn on_display_geometry_changed(&mut self, geometry: DisplayGeometry) {
        unsafe {
            hello_ar_application_on_display_geometry_changed(
                self.raw.as_ptr(),
                geometry.rotation,
                geometry.width,
                geometry.height,
            );
        }
    }

    fn on_draw_frame(&mut self) -> StatusCode {
        StatusCode(unsafe { hello_ar_application_on_draw_frame(self.raw.as_ptr()) })
    }

    fn on_touched(&mut self, touch: TouchEvent) {
        unsafe {
            hello_ar_application_on_touched(self.raw.as_ptr(), touch.x, touch.y, touch.long_press);
        }
    }

    fn has_detected_planes(&self) -> bool {
        unsafe { hello_ar_application_has_detected_planes(self.raw.as_ptr()) }
    }
}

impl Drop for NativeApplication {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        unsafe { hello_ar_application_delete(self.raw.as_ptr()) }
    }
}

/// Builds [`NativeApplication`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFactory;

impl ApplicationFactory for NativeFactory {
    #[allow(unsafe_code)]
    fn construct(
        &self,
        assets: AssetSource,
        external_dir: &str,
    ) -> Result<Box<dyn ArApplication>, BridgeError> {
        let external_dir = StrView::new(external_dir);
        let raw = unsafe {
            hello_ar_application_new(assets.0.as_ptr(), external_dir.data(), external_dir.len())
        };
        let raw = NonNull::new(raw)
            .ok_or_else(|| BridgeError::construction_failed("hello_ar_application_new returned null"))?;
        Ok(Box::new(NativeApplication { raw }))
    }
}
