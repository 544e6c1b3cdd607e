//! A simulated application.
//!
//! [`SimulatedApplication`] implements [`ArApplication`] without any AR or
//! streaming SDK. It tracks just enough state to answer queries plausibly
//! and records every call it receives in a shared [`Journal`], which makes
//! it the fake used by tests and the `xr-bridge simulate` command.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::application::{
    ApplicationFactory, ArApplication, AssetSource, DisplayGeometry, ResumeTarget, StatusCode,
    TouchEvent,
};
use xr_bridge_common::{BridgeError, SimulationConfig};

/// A call observed by a simulated application.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Constructed { external_dir: String },
    Init,
    Pause,
    Resume,
    LaunchOptions(String),
    Args(String),
    SurfaceCreated,
    GeometryChanged(DisplayGeometry),
    DrawFrame(StatusCode),
    Touched(TouchEvent),
    Dropped,
}

/// Shared, append-only record of calls.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.lock().push(call);
    }

    /// Copy of every call recorded so far.
    pub fn snapshot(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// An application that only pretends to track and stream.
#[derive(Debug)]
pub struct SimulatedApplication {
    config: SimulationConfig,
    server_address: String,
    resumed: bool,
    surface_ready: bool,
    frames_drawn: u32,
    journal: Journal,
}

impl SimulatedApplication {
    /// Status returned by `on_draw_frame` while paused or before the surface
    /// exists.
    pub const NOT_READY: StatusCode = StatusCode(1);

    pub fn new(config: SimulationConfig, journal: Journal) -> Self {
        Self {
            server_address: config.server_address.clone(),
            config,
            resumed: false,
            surface_ready: false,
            frames_drawn: 0,
            journal,
        }
    }

    /// Number of frames drawn successfully.
    pub fn frames_drawn(&self) -> u32 {
        self.frames_drawn
    }

    /// Apply `-s <addr>` / `--server <addr>` options, last one wins.
    fn apply_options(&mut self, text: &str) {
        let mut tokens = text.split_whitespace();
        while let Some(token) = tokens.next() {
            let value = match token {
                "-s" | "--server" => tokens.next(),
                _ => token.strip_prefix("--server="),
            };
            if let Some(address) = value {
                debug!(address, "Server address set");
                self.server_address = address.to_string();
            }
        }
    }
}

impl ArApplication for SimulatedApplication {
    fn init(&mut self) -> StatusCode {
        self.journal.record(Call::Init);
        StatusCode(self.config.init_status)
    }

    fn on_pause(&mut self) {
        self.resumed = false;
        self.journal.record(Call::Pause);
    }

    fn on_resume(&mut self, _target: ResumeTarget) {
        self.resumed = true;
        self.journal.record(Call::Resume);
    }

    fn handle_launch_options(&mut self, options: &str) {
        self.apply_options(options);
        self.journal.record(Call::LaunchOptions(options.to_string()));
    }

    fn set_args(&mut self, args: &str) {
        self.apply_options(args);
        self.journal.record(Call::Args(args.to_string()));
    }

    fn server_address(&self) -> String {
        self.server_address.clone()
    }

    fn on_surface_created(&mut self) {
        self.surface_ready = true;
        self.journal.record(Call::SurfaceCreated);
    }

    fn on_display_geometry_changed(&mut self, geometry: DisplayGeometry) {
        self.journal.record(Call::GeometryChanged(geometry));
    }

    fn on_draw_frame(&mut self) -> StatusCode {
        let status = if self.resumed && self.surface_ready {
            self.frames_drawn = self.frames_drawn.saturating_add(1);
            StatusCode::SUCCESS
        } else {
            Self::NOT_READY
        };
        self.journal.record(Call::DrawFrame(status));
        status
    }

    fn on_touched(&mut self, touch: TouchEvent) {
        self.journal.record(Call::Touched(touch));
    }

    fn has_detected_planes(&self) -> bool {
        self.frames_drawn >= self.config.planes_after_frames
    }
}

impl Drop for SimulatedApplication {
    fn drop(&mut self) {
        self.journal.record(Call::Dropped);
    }
}

/// Builds [`SimulatedApplication`]s that share one journal.
#[derive(Debug, Clone, Default)]
pub struct SimulatedFactory {
    config: SimulationConfig,
    journal: Journal,
    fail_construction: bool,
}

impl SimulatedFactory {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            journal: Journal::default(),
            fail_construction: false,
        }
    }

    /// Make every construction fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_construction = true;
        self
    }

    /// The journal every constructed application records into.
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl ApplicationFactory for SimulatedFactory {
    fn construct(
        &self,
        _assets: AssetSource,
        external_dir: &str,
    ) -> Result<Box<dyn ArApplication>, BridgeError> {
        if self.fail_construction {
            return Err(BridgeError::construction_failed(
                "simulated construction failure",
            ));
        }

        self.journal.record(Call::Constructed {
            external_dir: external_dir.to_string(),
        });
        Ok(Box::new(SimulatedApplication::new(
            self.config.clone(),
            self.journal.clone(),
        )))
    }
}
