//! Application handle type.
//!
//! The managed side only ever sees a 64-bit integer. [`AppHandle`] packs a
//! registry slot index and that slot's generation into it so that a handle
//! kept after `destroy` is detected instead of reaching a reused slot.

use std::fmt;

use xr_bridge_common::BridgeError;

/// Raw value handed to the caller when no application could be created.
pub const NULL_RAW: i64 = 0;

/// A handle to an application in a [`HandleRegistry`](crate::HandleRegistry).
///
/// Encoded as `(generation << 32) | (index + 1)`, so the low word is never
/// zero and [`NULL_RAW`] never decodes to a handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl AppHandle {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation counter.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Encode the handle as the integer passed across the boundary.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_raw(self) -> i64 {
        (((self.generation as u64) << 32) | (self.index as u64 + 1)) as i64
    }

    /// Decode a raw integer, returning `None` for the null sentinel or a
    /// value whose low word is zero.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn from_raw(raw: i64) -> Option<Self> {
        let bits = raw as u64;
        let low = bits as u32;
        if low == 0 {
            return None;
        }
        Some(Self {
            index: low - 1,
            generation: (bits >> 32) as u32,
        })
    }
}

impl TryFrom<i64> for AppHandle {
    type Error = BridgeError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or_else(|| BridgeError::invalid_handle(raw))
    }
}

impl From<AppHandle> for i64 {
    fn from(handle: AppHandle) -> Self {
        handle.to_raw()
    }
}

impl fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppHandle({}@gen{})", self.index, self.generation)
    }
}

impl fmt::Display for AppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app#{}@gen{}", self.index, self.generation)
    }
}
