//! Generational handle registry.
//!
//! [`HandleRegistry`] owns every live application and hands out
//! [`AppHandle`]s for them. Freed slots are recycled through a free list and
//! their generation is bumped, so a handle kept past `remove` is reported as
//! stale rather than reaching whatever now occupies the slot.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::handle::AppHandle;
use xr_bridge_common::BridgeError;

/// An entry shared between the registry and in-flight calls.
pub type Shared<T> = Arc<Mutex<T>>;

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<Shared<T>>,
}

#[derive(Debug)]
struct Slots<T> {
    entries: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: u32,
}

/// Thread-safe arena of values addressed by generational handles.
///
/// # Locking
///
/// The slot table sits behind a read-write lock that is only held while a
/// handle is resolved. Each value has its own mutex, so calls on different
/// handles never contend, while calls on one handle are serialized.
/// Removing a value does not wait for calls already running on it: the
/// value is dropped when the last of those calls returns.
#[derive(Debug)]
pub struct HandleRegistry<T> {
    slots: RwLock<Slots<T>>,
    limit: u32,
}

impl<T> HandleRegistry<T> {
    /// Create an empty registry holding at most `limit` live values.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            slots: RwLock::new(Slots {
                entries: Vec::new(),
                free_list: Vec::new(),
                live: 0,
            }),
            limit,
        }
    }

    /// Store a value and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::CapacityExceeded`] if the registry is full.
    pub fn insert(&self, value: T) -> Result<AppHandle, BridgeError> {
        let mut slots = self.slots.write();
        if slots.live >= self.limit {
            return Err(BridgeError::CapacityExceeded { limit: self.limit });
        }

        let shared = Arc::new(Mutex::new(value));
        let index = if let Some(index) = slots.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on removal.
            slots.entries[index as usize].value = Some(shared);
            index
        } else {
            // The encoded handle stores `index + 1` in 32 bits.
            let index = u32::try_from(slots.entries.len())
                .ok()
                .filter(|index| *index < u32::MAX)
                .ok_or(BridgeError::CapacityExceeded { limit: self.limit })?;
            slots.entries.push(Slot {
                generation: 0,
                value: Some(shared),
            });
            index
        };
        slots.live += 1;

        let handle = AppHandle::new(index, slots.entries[index as usize].generation);
        debug!(%handle, live = slots.live, "Slot allocated");
        Ok(handle)
    }

    /// Resolve a handle to its shared value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownHandle`] for a slot that was never
    /// allocated and [`BridgeError::StaleHandle`] for a freed one.
    pub fn get(&self, handle: AppHandle) -> Result<Shared<T>, BridgeError> {
        let slots = self.slots.read();
        let slot = Self::live_slot(&slots, handle)?;
        slot.value
            .clone()
            .ok_or_else(|| Self::stale(handle, slot.generation))
    }

    /// Run `f` with exclusive access to the value behind `handle`.
    ///
    /// The slot table lock is released before `f` runs.
    pub fn with<R>(&self, handle: AppHandle, f: impl FnOnce(&mut T) -> R) -> Result<R, BridgeError> {
        let shared = self.get(handle)?;
        let mut value = shared.lock();
        Ok(f(&mut value))
    }

    /// Remove the value behind `handle`, invalidating the handle.
    ///
    /// Returns the registry's reference to the value; once it and every
    /// in-flight reference are dropped, the value itself is dropped.
    pub fn remove(&self, handle: AppHandle) -> Result<Shared<T>, BridgeError> {
        let mut slots = self.slots.write();
        Self::live_slot(&slots, handle)?;

        let slot = &mut slots.entries[handle.index as usize];
        let Some(value) = slot.value.take() else {
            return Err(Self::stale(handle, slot.generation));
        };

        // Bump generation so old handles immediately fail validation. A slot
        // whose generation is exhausted is retired instead of reused.
        let retired = slot.generation == u32::MAX;
        if !retired {
            slot.generation += 1;
            slots.free_list.push(handle.index);
        }
        slots.live -= 1;

        debug!(%handle, retired, live = slots.live, "Slot freed");
        Ok(value)
    }

    /// Returns whether the handle refers to a live value.
    pub fn contains(&self, handle: AppHandle) -> bool {
        let slots = self.slots.read();
        Self::live_slot(&slots, handle).is_ok_and(|slot| slot.value.is_some())
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots.read().live as usize
    }

    /// Returns `true` if no value is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live values.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn live_slot(slots: &Slots<T>, handle: AppHandle) -> Result<&Slot<T>, BridgeError> {
        let slot = slots
            .entries
            .get(handle.index as usize)
            .ok_or(BridgeError::UnknownHandle {
                index: handle.index,
            })?;
        if slot.generation != handle.generation {
            return Err(Self::stale(handle, slot.generation));
        }
        Ok(slot)
    }

    fn stale(handle: AppHandle, current: u32) -> BridgeError {
        BridgeError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
            current,
        }
    }
}
