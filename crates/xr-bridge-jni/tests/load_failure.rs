//! Loading with a factory that panics.
//!
//! Runs in its own process: the runtime it checks is process-wide.

use jni::sys::{JNI_ERR, JNI_VERSION_1_6};
use jni::{InitArgsBuilder, JNIVersion, JavaVM};

use xr_bridge_common::{BridgeError, ConfigFile};
use xr_bridge_core::{ApplicationFactory, SimulatedFactory};
use xr_bridge_jni::{entry, runtime};

#[test]
#[allow(unsafe_code)]
fn test_panicking_factory_fails_load_and_allows_retry() {
    let args = InitArgsBuilder::new()
        .version(JNIVersion::V8)
        .build()
        .unwrap();
    let vm = JavaVM::new(args).unwrap();

    let status = unsafe {
        entry::on_load(
            vm.get_java_vm_pointer(),
            |_config: &ConfigFile| -> Box<dyn ApplicationFactory> { panic!("factory exploded") },
        )
    };
    assert_eq!(status, JNI_ERR);
    assert!(matches!(runtime::get(), Err(BridgeError::NotLoaded)));

    let status = unsafe {
        entry::on_load(
            vm.get_java_vm_pointer(),
            |config: &ConfigFile| -> Box<dyn ApplicationFactory> {
                Box::new(SimulatedFactory::new(config.simulation.clone()))
            },
        )
    };
    assert_eq!(status, JNI_VERSION_1_6);
    assert_eq!(runtime::get().unwrap().bridge().live_applications(), 0);
}
