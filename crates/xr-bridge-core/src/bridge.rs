//! The call-boundary shim.
//!
//! [`Bridge`] turns each boundary call into one method call on the
//! application identified by a handle. It owns the registry of live
//! applications and the factory that builds them, and applies the
//! configured policy for failed initialization.

use tracing::{debug, error, info, instrument, trace, warn};

use crate::application::{
    ApplicationFactory, ArApplication, AssetSource, DisplayGeometry, ResumeTarget, StatusCode,
    TouchEvent,
};
use crate::handle::AppHandle;
use crate::registry::HandleRegistry;
use xr_bridge_common::{BridgeConfig, BridgeError, InitFailurePolicy};

type Application = Box<dyn ArApplication>;

/// Forwards boundary calls to live applications.
///
/// # Thread Safety
///
/// `Bridge` is `Sync` and meant to be shared by every thread the caller
/// uses. Calls for one handle run one at a time; calls for different
/// handles run concurrently.
pub struct Bridge {
    factory: Box<dyn ApplicationFactory>,
    registry: HandleRegistry<Application>,
    init_failure: InitFailurePolicy,
}

impl Bridge {
    /// Create a bridge that builds applications with `factory`.
    pub fn new(factory: Box<dyn ApplicationFactory>, config: &BridgeConfig) -> Self {
        Self {
            factory,
            registry: HandleRegistry::with_limit(config.registry.max_instances),
            init_failure: config.lifecycle.init_failure,
        }
    }

    /// Construct, initialize and register a new application.
    ///
    /// A missing `external_dir` is passed to the factory as an empty path.
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails, if `init` reports a failure
    /// under [`InitFailurePolicy::Reject`], or if the registry is full.
    #[instrument(skip(self, assets))]
    pub fn create(
        &self,
        assets: AssetSource,
        external_dir: Option<&str>,
    ) -> Result<AppHandle, BridgeError> {
        let mut app = self.factory.construct(assets, external_dir.unwrap_or(""))?;

        let status = app.init();
        if !status.is_success() {
            match self.init_failure {
                InitFailurePolicy::Reject => {
                    error!(status = %status, "Application init failed, discarding instance");
                    return Err(BridgeError::InitFailed {
                        code: status.code(),
                    });
                }
                InitFailurePolicy::Keep => {
                    warn!(status = %status, "Application init failed, keeping instance");
                }
            }
        }

        let handle = self.registry.insert(app)?;
        info!(%handle, live = self.registry.len(), "Application created");
        Ok(handle)
    }

    /// Release an application. The handle is invalid afterwards.
    ///
    /// If another thread is inside a call on the same application, the
    /// application is dropped when that call returns.
    #[instrument(skip(self), fields(handle = %handle))]
    pub fn destroy(&self, handle: AppHandle) -> Result<(), BridgeError> {
        let app = self.registry.remove(handle)?;
        drop(app);
        info!(live = self.registry.len(), "Application destroyed");
        Ok(())
    }

    pub fn pause(&self, handle: AppHandle) -> Result<(), BridgeError> {
        debug!(%handle, "Pause");
        self.registry.with(handle, |app| app.on_pause())
    }

    pub fn resume(&self, handle: AppHandle, target: ResumeTarget) -> Result<(), BridgeError> {
        debug!(%handle, "Resume");
        self.registry.with(handle, |app| app.on_resume(target))
    }

    /// Forward launch options. `None` is delivered as an empty string.
    pub fn handle_launch_options(
        &self,
        handle: AppHandle,
        options: Option<&str>,
    ) -> Result<(), BridgeError> {
        let options = options.unwrap_or("");
        debug!(%handle, len = options.len(), "Launch options");
        self.registry
            .with(handle, |app| app.handle_launch_options(options))
    }

    /// Forward runtime arguments. `None` is delivered as an empty string.
    pub fn set_args(&self, handle: AppHandle, args: Option<&str>) -> Result<(), BridgeError> {
        let args = args.unwrap_or("");
        debug!(%handle, len = args.len(), "Set args");
        self.registry.with(handle, |app| app.set_args(args))
    }

    pub fn server_address(&self, handle: AppHandle) -> Result<String, BridgeError> {
        self.registry.with(handle, |app| app.server_address())
    }

    pub fn surface_created(&self, handle: AppHandle) -> Result<(), BridgeError> {
        debug!(%handle, "Surface created");
        self.registry.with(handle, |app| app.on_surface_created())
    }

    pub fn display_geometry_changed(
        &self,
        handle: AppHandle,
        geometry: DisplayGeometry,
    ) -> Result<(), BridgeError> {
        debug!(
            %handle,
            rotation = geometry.rotation,
            width = geometry.width,
            height = geometry.height,
            "Display geometry changed"
        );
        self.registry
            .with(handle, |app| app.on_display_geometry_changed(geometry))
    }

    /// Draw one frame and return the application's status unchanged.
    pub fn draw_frame(&self, handle: AppHandle) -> Result<StatusCode, BridgeError> {
        let status = self.registry.with(handle, |app| app.on_draw_frame())?;
        trace!(%handle, status = %status, "Frame drawn");
        Ok(status)
    }

    pub fn touched(&self, handle: AppHandle, touch: TouchEvent) -> Result<(), BridgeError> {
        trace!(%handle, x = touch.x, y = touch.y, long_press = touch.long_press, "Touch");
        self.registry.with(handle, |app| app.on_touched(touch))
    }

    pub fn has_detected_planes(&self, handle: AppHandle) -> Result<bool, BridgeError> {
        self.registry.with(handle, |app| app.has_detected_planes())
    }

    /// Number of live applications.
    pub fn live_applications(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether `handle` refers to a live application.
    pub fn is_live(&self, handle: AppHandle) -> bool {
        self.registry.contains(handle)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("live", &self.registry.len())
            .field("limit", &self.registry.limit())
            .field("init_failure", &self.init_failure)
            .finish_non_exhaustive()
    }
}
