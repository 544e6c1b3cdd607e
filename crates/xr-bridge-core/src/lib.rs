//! Handle registry and call-boundary shim for xr-bridge.
//!
//! This crate holds everything about the bridge that does not depend on the
//! JVM:
//! - [`AppHandle`]: Generational handle encoded into the caller's integer
//! - [`HandleRegistry`]: Arena of live applications
//! - [`ArApplication`] / [`ApplicationFactory`]: The wrapped application contract
//! - [`Bridge`]: One method per boundary call
//! - [`SimulatedApplication`]: An SDK-free application for tests and tooling
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │               boundary call (JNI entry)                 │
//! │  raw i64 handle + primitive / string arguments          │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Bridge                           │
//! │  - decode AppHandle, reject null / stale handles        │
//! │  - null strings become ""                               │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │         HandleRegistry<Box<dyn ArApplication>>          │
//! │  - per-application mutex                                │
//! │  - generation bumped on destroy                         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod application;
pub mod bridge;
pub mod handle;
pub mod registry;
pub mod simulated;

pub use application::{
    ApplicationFactory, ArApplication, AssetSource, DisplayGeometry, OpaqueRef, ResumeTarget,
    StatusCode, TouchEvent,
};
pub use bridge::Bridge;
pub use handle::{AppHandle, NULL_RAW};
pub use registry::HandleRegistry;
pub use simulated::{Call, Journal, SimulatedApplication, SimulatedFactory};
