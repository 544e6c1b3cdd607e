//! Export macro for the JNI symbols.

/// Export every native method of `com.nvidia.ar.hellocloudxr.JniInterface`,
/// plus `JNI_OnLoad` and the `GetJniEnv` / `FindClass` C helpers.
///
/// The argument is a function or closure taking `&ConfigFile` and returning
/// the [`ApplicationFactory`](crate::ApplicationFactory) used for every
/// `createNativeApplication` call:
///
/// ```ignore
/// xr_bridge_jni::jni_interface!(|config: &xr_bridge_jni::ConfigFile| {
///     xr_bridge_jni::SimulatedFactory::new(config.simulation.clone())
/// });
/// ```
///
/// Invoke it once, at the root of a `cdylib`.
#[macro_export]
macro_rules! jni_interface {
    ($factory:expr) => {
        #[allow(unsafe_code, non_snake_case, clippy::not_unsafe_ptr_arg_deref)]
        #[unsafe(no_mangle)]
        pub extern "system" fn JNI_OnLoad(
            vm: *mut $crate::jni::sys::JavaVM,
            _reserved: *mut ::std::ffi::c_void,
        ) -> $crate::jni::sys::jint {
            // SAFETY: called by the VM with its own pointer.
            unsafe {
                $crate::entry::on_load(vm, |config| {
                    let factory: ::std::boxed::Box<dyn $crate::ApplicationFactory> =
                        ::std::boxed::Box::new(($factory)(config));
                    factory
                })
            }
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "C" fn GetJniEnv() -> *mut $crate::jni::sys::JNIEnv {
            $crate::entry::get_jni_env()
        }

        /// # Safety
        ///
        /// `name` must be null or a NUL-terminated string.
        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn FindClass(
            name: *const ::std::ffi::c_char,
        ) -> $crate::jni::sys::jclass {
            // SAFETY: forwarded from the C caller, same contract.
            unsafe { $crate::entry::find_class(name) }
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_createNativeApplication<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            asset_manager: $crate::jni::objects::JObject<'local>,
            external_dir: $crate::jni::objects::JString<'local>,
        ) -> $crate::jni::sys::jlong {
            $crate::entry::create_native_application(env, &asset_manager, &external_dir)
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_destroyNativeApplication<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) {
            $crate::entry::destroy_native_application(env, handle);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onPause<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) {
            $crate::entry::on_pause(env, handle);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onResume<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
            context: $crate::jni::objects::JObject<'local>,
            activity: $crate::jni::objects::JObject<'local>,
        ) {
            $crate::entry::on_resume(env, handle, &context, &activity);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_handleLaunchOptions<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
            options: $crate::jni::objects::JString<'local>,
        ) {
            $crate::entry::handle_launch_options(env, handle, &options);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_setArgs<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
            args: $crate::jni::objects::JString<'local>,
        ) {
            $crate::entry::set_args(env, handle, &args);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_getServerIp<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) -> $crate::jni::sys::jstring {
            $crate::entry::get_server_ip(env, handle)
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onGlSurfaceCreated<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) {
            $crate::entry::on_gl_surface_created(env, handle);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onDisplayGeometryChanged<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
            rotation: $crate::jni::sys::jint,
            width: $crate::jni::sys::jint,
            height: $crate::jni::sys::jint,
        ) {
            $crate::entry::on_display_geometry_changed(env, handle, rotation, width, height);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onGlSurfaceDrawFrame<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) -> $crate::jni::sys::jint {
            $crate::entry::on_gl_surface_draw_frame(env, handle)
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_onTouched<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
            x: $crate::jni::sys::jfloat,
            y: $crate::jni::sys::jfloat,
            long_press: $crate::jni::sys::jboolean,
        ) {
            $crate::entry::on_touched(env, handle, x, y, long_press);
        }

        #[allow(unsafe_code, non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "system" fn Java_com_nvidia_ar_hellocloudxr_JniInterface_hasDetectedPlanes<'local>(
            env: $crate::jni::JNIEnv<'local>,
            _class: $crate::jni::objects::JClass<'local>,
            handle: $crate::jni::sys::jlong,
        ) -> $crate::jni::sys::jboolean {
            $crate::entry::has_detected_planes(env, handle)
        }
    };
}
