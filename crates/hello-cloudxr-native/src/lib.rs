//! Native library behind `com.nvidia.ar.hellocloudxr.JniInterface`.
//!
//! On Android the bridge drives the C++ `HelloArApplication` through the C
//! ABI declared in [`native`]. Elsewhere the library exports the same
//! symbols backed by the simulated application, which lets JVM tests load it
//! on a desktop.

pub mod abi;
#[cfg(target_os = "android")]
pub mod native;

#[cfg(target_os = "android")]
xr_bridge_jni::jni_interface!(|_config: &xr_bridge_jni::ConfigFile| native::NativeFactory);

#[cfg(not(target_os = "android"))]
xr_bridge_jni::jni_interface!(simulated_factory);

/// Factory for hosts without the native application.
#[cfg(not(target_os = "android"))]
pub fn simulated_factory(config: &xr_bridge_jni::ConfigFile) -> xr_bridge_jni::SimulatedFactory {
    tracing::info!(
        server = %config.simulation.server_address,
        "Using simulated application"
    );
    xr_bridge_jni::SimulatedFactory::new(config.simulation.clone())
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;
    use xr_bridge_core::{ApplicationFactory, AssetSource};

    #[test]
    fn test_simulated_factory_uses_configured_address() {
        let config = xr_bridge_jni::ConfigFile::from_toml(
            r#"
[simulation]
server_address = "10.20.30.40"
"#,
        )
        .unwrap();

        let factory = simulated_factory(&config);
        let app = factory.construct(AssetSource::default(), "").unwrap();
        assert_eq!(app.server_address(), "10.20.30.40");
    }
}
