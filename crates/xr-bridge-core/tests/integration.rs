//! Integration tests for xr-bridge-core.
//!
//! These tests drive [`Bridge`] the way the JNI layer does:
//! - Full activity lifecycle against the simulated application
//! - String marshaling guarantees
//! - Handle validity across create/destroy cycles
//! - Calls from several threads

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use xr_bridge_common::{BridgeConfig, BridgeError, SimulationConfig};
use xr_bridge_core::{
    AppHandle, ApplicationFactory, ArApplication, AssetSource, Bridge, Call, DisplayGeometry,
    NULL_RAW, OpaqueRef, ResumeTarget, SimulatedApplication, SimulatedFactory, StatusCode,
    TouchEvent,
};

fn simulated_bridge(config: SimulationConfig) -> (Bridge, xr_bridge_core::Journal) {
    let factory = SimulatedFactory::new(config);
    let journal = factory.journal();
    (
        Bridge::new(Box::new(factory), &BridgeConfig::default()),
        journal,
    )
}

// ============================================================================
// Test: Activity Lifecycle
// ============================================================================

#[test]
fn test_full_lifecycle() {
    let (bridge, journal) = simulated_bridge(SimulationConfig {
        planes_after_frames: 3,
        ..Default::default()
    });

    let handle = bridge
        .create(AssetSource::default(), Some("/storage/emulated/0/Android/data/app"))
        .unwrap();
    bridge
        .handle_launch_options(handle, Some("-s 192.168.0.42"))
        .unwrap();
    bridge.resume(handle, ResumeTarget::default()).unwrap();
    bridge.surface_created(handle).unwrap();

    let geometry = DisplayGeometry {
        rotation: 1,
        width: 2400,
        height: 1080,
    };
    bridge.display_geometry_changed(handle, geometry).unwrap();

    for _ in 0..3 {
        assert_eq!(bridge.draw_frame(handle).unwrap(), StatusCode::SUCCESS);
    }
    assert!(bridge.has_detected_planes(handle).unwrap());

    let touch = TouchEvent {
        x: 540.0,
        y: 1200.5,
        long_press: false,
    };
    bridge.touched(handle, touch).unwrap();
    assert_eq!(bridge.server_address(handle).unwrap(), "192.168.0.42");

    bridge.pause(handle).unwrap();
    assert_eq!(
        bridge.draw_frame(handle).unwrap(),
        SimulatedApplication::NOT_READY
    );

    bridge.destroy(handle).unwrap();
    assert_eq!(bridge.live_applications(), 0);

    assert_eq!(
        journal.snapshot(),
        vec![
            Call::Constructed {
                external_dir: "/storage/emulated/0/Android/data/app".into()
            },
            Call::Init,
            Call::LaunchOptions("-s 192.168.0.42".into()),
            Call::Resume,
            Call::SurfaceCreated,
            Call::GeometryChanged(geometry),
            Call::DrawFrame(StatusCode::SUCCESS),
            Call::DrawFrame(StatusCode::SUCCESS),
            Call::DrawFrame(StatusCode::SUCCESS),
            Call::Touched(touch),
            Call::Pause,
            Call::DrawFrame(SimulatedApplication::NOT_READY),
            Call::Dropped,
        ]
    );
}

#[test]
fn test_create_returns_non_zero_raw_handle() {
    let (bridge, _journal) = simulated_bridge(SimulationConfig::default());

    for _ in 0..8 {
        let handle = bridge.create(AssetSource::default(), None).unwrap();
        assert_ne!(handle.to_raw(), NULL_RAW);
        bridge.destroy(handle).unwrap();
    }
}

// ============================================================================
// Test: String Marshaling
// ============================================================================

#[test]
fn test_strings_arrive_unchanged() {
    let (bridge, journal) = simulated_bridge(SimulationConfig::default());
    let handle = bridge.create(AssetSource::default(), None).unwrap();

    let inputs = [
        "-s 10.0.0.1 --codec hevc",
        "  leading and trailing  ",
        "ünïcödé ☃ 日本語",
        "tab\tseparated\nlines",
    ];
    for input in inputs {
        bridge.set_args(handle, Some(input)).unwrap();
    }

    let received: Vec<_> = journal
        .snapshot()
        .into_iter()
        .filter_map(|call| match call {
            Call::Args(args) => Some(args),
            _ => None,
        })
        .collect();
    assert_eq!(received, inputs);
}

#[test]
fn test_null_strings_arrive_empty() {
    let (bridge, journal) = simulated_bridge(SimulationConfig::default());
    let handle = bridge.create(AssetSource::default(), None).unwrap();

    bridge.handle_launch_options(handle, None).unwrap();
    bridge.set_args(handle, None).unwrap();

    let calls = journal.snapshot();
    assert!(calls.contains(&Call::LaunchOptions(String::new())));
    assert!(calls.contains(&Call::Args(String::new())));
}

// ============================================================================
// Test: Handle Validity
// ============================================================================

#[test]
fn test_destroyed_handle_rejected_after_slot_reuse() {
    let (bridge, _journal) = simulated_bridge(SimulationConfig::default());

    let first = bridge.create(AssetSource::default(), None).unwrap();
    bridge.destroy(first).unwrap();
    let second = bridge.create(AssetSource::default(), None).unwrap();

    assert_eq!(first.index(), second.index());
    assert!(matches!(
        bridge.pause(first),
        Err(BridgeError::StaleHandle { .. })
    ));
    assert!(bridge.pause(second).is_ok());
}

#[test]
fn test_raw_values_that_are_not_handles() {
    let (bridge, _journal) = simulated_bridge(SimulationConfig::default());
    bridge.create(AssetSource::default(), None).unwrap();

    assert!(AppHandle::try_from(NULL_RAW).is_err());

    // Well-formed but never allocated.
    let unknown = AppHandle::try_from(42_i64).unwrap();
    assert!(matches!(
        bridge.draw_frame(unknown),
        Err(BridgeError::UnknownHandle { index: 41 })
    ));
}

#[test]
fn test_many_create_destroy_cycles_keep_registry_small() {
    let (bridge, journal) = simulated_bridge(SimulationConfig::default());

    let mut last = None;
    for _ in 0..100 {
        let handle = bridge.create(AssetSource::default(), None).unwrap();
        bridge.destroy(handle).unwrap();
        last = Some(handle);
    }

    let last = last.unwrap();
    assert_eq!(last.index(), 0);
    assert_eq!(last.generation(), 99);
    assert_eq!(bridge.live_applications(), 0);

    let dropped = journal
        .snapshot()
        .iter()
        .filter(|call| **call == Call::Dropped)
        .count();
    assert_eq!(dropped, 100);
}

// ============================================================================
// Test: Pass-Through of Platform References
// ============================================================================

#[derive(Default)]
struct Captured {
    resume: Option<ResumeTarget>,
    assets: Option<AssetSource>,
}

// Raw pointers are only compared, never dereferenced.
#[allow(unsafe_code)]
unsafe impl Send for Captured {}

struct CapturingApp(Arc<Mutex<Captured>>);

impl ArApplication for CapturingApp {
    fn init(&mut self) -> StatusCode {
        StatusCode::SUCCESS
    }
    fn on_pause(&mut self) {}
    fn on_resume(&mut self, target: ResumeTarget) {
        self.0.lock().resume = Some(target);
    }
    fn handle_launch_options(&mut self, _options: &str) {}
    fn set_args(&mut self, _args: &str) {}
    fn server_address(&self) -> String {
        String::new()
    }
    fn on_surface_created(&mut self) {}
    fn on_display_geometry_changed(&mut self, _geometry: DisplayGeometry) {}
    fn on_draw_frame(&mut self) -> StatusCode {
        StatusCode(-17)
    }
    fn on_touched(&mut self, _touch: TouchEvent) {}
    fn has_detected_planes(&self) -> bool {
        false
    }
}

struct CapturingFactory(Arc<Mutex<Captured>>);

impl ApplicationFactory for CapturingFactory {
    fn construct(
        &self,
        assets: AssetSource,
        _external_dir: &str,
    ) -> Result<Box<dyn ArApplication>, BridgeError> {
        self.0.lock().assets = Some(assets);
        Ok(Box::new(CapturingApp(Arc::clone(&self.0))))
    }
}

#[test]
fn test_platform_references_and_status_pass_through() {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let bridge = Bridge::new(
        Box::new(CapturingFactory(Arc::clone(&captured))),
        &BridgeConfig::default(),
    );

    let mut slots = [0_u8; 4];
    let [env, context, activity, assets] = slots
        .each_mut()
        .map(|slot| OpaqueRef::from_ptr(std::ptr::from_mut(slot)));

    let handle = bridge.create(AssetSource(assets), None).unwrap();
    let target = ResumeTarget {
        env,
        context,
        activity,
    };
    bridge.resume(handle, target).unwrap();

    let captured = captured.lock();
    assert_eq!(captured.assets, Some(AssetSource(assets)));
    assert_eq!(captured.resume, Some(target));
    drop(captured);

    // Status codes are surfaced untouched, even negative ones.
    assert_eq!(bridge.draw_frame(handle).unwrap(), StatusCode(-17));
}

// ============================================================================
// Test: Concurrency
// ============================================================================

#[test]
fn test_calls_from_multiple_threads() {
    let (bridge, journal) = simulated_bridge(SimulationConfig::default());
    let bridge = Arc::new(bridge);
    let handle = bridge.create(AssetSource::default(), None).unwrap();
    bridge.resume(handle, ResumeTarget::default()).unwrap();
    bridge.surface_created(handle).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || {
                for _ in 0..250 {
                    assert_eq!(bridge.draw_frame(handle).unwrap(), StatusCode::SUCCESS);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let frames = journal
        .snapshot()
        .iter()
        .filter(|call| matches!(call, Call::DrawFrame(_)))
        .count();
    assert_eq!(frames, 1000);
}

#[test]
fn test_independent_handles_on_separate_threads() {
    let (bridge, _journal) = simulated_bridge(SimulationConfig::default());
    let bridge = Arc::new(bridge);

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || {
                let handle = bridge.create(AssetSource::default(), None).unwrap();
                let address = format!("10.0.0.{i}");
                bridge
                    .set_args(handle, Some(&format!("-s {address}")))
                    .unwrap();
                let reported = bridge.server_address(handle).unwrap();
                bridge.destroy(handle).unwrap();
                (address, reported)
            })
        })
        .collect();

    for worker in workers {
        let (expected, reported) = worker.join().unwrap();
        assert_eq!(expected, reported);
    }
    assert_eq!(bridge.live_applications(), 0);
}
