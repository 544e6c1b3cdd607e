//! The wrapped application contract.
//!
//! All AR tracking, rendering and streaming lives in an externally supplied
//! application object. The bridge only needs the surface described by
//! [`ArApplication`], and an [`ApplicationFactory`] to build instances.

use std::ffi::c_void;
use std::fmt;

use xr_bridge_common::BridgeError;

/// A platform reference passed through the bridge without interpretation.
///
/// Wraps a raw pointer such as a `JNIEnv*`, a `jobject`, or an
/// `AAssetManager*`. It is only valid for the duration of the call that
/// produced it unless the platform says otherwise.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OpaqueRef(*mut c_void);

impl OpaqueRef {
    /// The null reference.
    pub const fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    /// Wrap a raw pointer.
    pub fn from_ptr<T>(ptr: *mut T) -> Self {
        Self(ptr.cast())
    }

    /// Return the wrapped pointer.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0.cast()
    }

    /// Returns `true` if the reference is null.
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for OpaqueRef {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueRef({:p})", self.0)
    }
}

/// The platform asset source an application loads its resources from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetSource(pub OpaqueRef);

/// The references handed to an application when it resumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeTarget {
    /// Calling thread's `JNIEnv*`.
    pub env: OpaqueRef,
    /// The Android `Context`.
    pub context: OpaqueRef,
    /// The Android `Activity`.
    pub activity: OpaqueRef,
}

/// Status code reported by the application.
///
/// Zero means success; every other value is defined by the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    /// The success status.
    pub const SUCCESS: Self = Self(0);

    /// Returns `true` for the success status.
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// The raw code.
    pub const fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display rotation and viewport size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayGeometry {
    /// `Surface.ROTATION_*` value.
    pub rotation: i32,
    pub width: i32,
    pub height: i32,
}

/// A single tap on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub long_press: bool,
}

/// The externally supplied application.
///
/// Every bridge operation maps to exactly one of these methods. Calls on a
/// single instance are serialized by the bridge.
pub trait ArApplication: Send {
    /// Second-phase initialization, run once right after construction.
    fn init(&mut self) -> StatusCode;

    fn on_pause(&mut self);

    fn on_resume(&mut self, target: ResumeTarget);

    /// Apply launch options passed to the activity.
    fn handle_launch_options(&mut self, options: &str);

    /// Apply arguments entered at runtime.
    fn set_args(&mut self, args: &str);

    /// Address of the streaming server currently configured.
    fn server_address(&self) -> String;

    /// Allocate rendering resources. Called on the GL thread.
    fn on_surface_created(&mut self);

    /// Called on the GL thread before drawing when the viewport may have
    /// changed.
    fn on_display_geometry_changed(&mut self, geometry: DisplayGeometry);

    /// Render one frame. Called on the GL thread.
    fn on_draw_frame(&mut self) -> StatusCode;

    fn on_touched(&mut self, touch: TouchEvent);

    fn has_detected_planes(&self) -> bool;
}

/// Builds application instances.
pub trait ApplicationFactory: Send + Sync {
    /// Construct an application.
    ///
    /// `external_dir` is the app's external files directory, or empty when
    /// the caller supplied none.
    fn construct(
        &self,
        assets: AssetSource,
        external_dir: &str,
    ) -> Result<Box<dyn ArApplication>, BridgeError>;
}
