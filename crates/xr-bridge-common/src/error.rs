//! Error types for the xr-bridge.
//!
//! This module defines the error hierarchy using `thiserror`:
//! - [`BridgeError`]: Top-level errors for boundary calls
//! - [`MarshalError`]: Failures converting values across the JNI boundary

use thiserror::Error;

/// Top-level bridge errors.
///
/// These errors represent the ways a boundary call can be rejected, from
/// handle validation to constructing and initializing the wrapped
/// application.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The raw handle is the null sentinel or is not a well-formed handle.
    #[error("Invalid application handle: {raw:#x}")]
    InvalidHandle {
        /// The raw value received from the caller.
        raw: i64,
    },

    /// The handle points at a slot that was never allocated.
    #[error("Unknown application handle: slot {index}")]
    UnknownHandle {
        /// Slot index encoded in the handle.
        index: u32,
    },

    /// The handle refers to an application that has already been destroyed.
    #[error("Stale application handle: slot {index} generation {generation} (current {current})")]
    StaleHandle {
        /// Slot index encoded in the handle.
        index: u32,
        /// Generation encoded in the handle.
        generation: u32,
        /// Generation currently held by the slot.
        current: u32,
    },

    /// The application factory could not construct an instance.
    #[error("Application construction failed: {reason}")]
    ConstructionFailed {
        /// Description of the construction failure.
        reason: String,
    },

    /// The application was constructed but its init step reported an error.
    #[error("Application initialization failed with status {code}")]
    InitFailed {
        /// Status code returned by the application's init step.
        code: i32,
    },

    /// The handle registry is full.
    #[error("Application limit reached: {limit}")]
    CapacityExceeded {
        /// The configured maximum number of live applications.
        limit: u32,
    },

    /// A boundary call arrived before the bridge runtime was installed.
    #[error("Bridge runtime is not loaded")]
    NotLoaded,

    /// A value could not be converted across the boundary.
    #[error("Marshaling error: {0}")]
    Marshal(#[from] MarshalError),
}

/// Errors converting values between the managed runtime and Rust.
#[derive(Error, Debug)]
pub enum MarshalError {
    /// A string argument could not be read from the caller.
    #[error("Failed to read string argument: {reason}")]
    StringRead {
        /// Description of the failure.
        reason: String,
    },

    /// A string result could not be created for the caller.
    #[error("Failed to create string result: {reason}")]
    StringCreate {
        /// Description of the failure.
        reason: String,
    },

    /// Any other JNI call failed.
    #[error("JNI call failed: {reason}")]
    Jni {
        /// Description of the failure.
        reason: String,
    },
}

impl BridgeError {
    /// Create a new `ConstructionFailed` error.
    pub fn construction_failed(reason: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            reason: reason.into(),
        }
    }

    /// Create a new `InvalidHandle` error.
    pub fn invalid_handle(raw: i64) -> Self {
        Self::InvalidHandle { raw }
    }

    /// Returns `true` if the caller passed a handle that does not refer to a
    /// live application.
    pub fn is_handle_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHandle { .. } | Self::UnknownHandle { .. } | Self::StaleHandle { .. }
        )
    }

    /// Returns `true` if the error happened while bringing an application up.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            Self::ConstructionFailed { .. } | Self::InitFailed { .. } | Self::CapacityExceeded { .. }
        )
    }
}

impl MarshalError {
    /// Create a new `StringRead` error.
    pub fn string_read(reason: impl Into<String>) -> Self {
        Self::StringRead {
            reason: reason.into(),
        }
    }

    /// Create a new `StringCreate` error.
    pub fn string_create(reason: impl Into<String>) -> Self {
        Self::StringCreate {
            reason: reason.into(),
        }
    }

    /// Create a new `Jni` error.
    pub fn jni(reason: impl Into<String>) -> Self {
        Self::Jni {
            reason: reason.into(),
        }
    }
}
