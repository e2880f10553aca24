//! Opaque handle lifecycle.
//!
//! A [`Handle`] is an owned, move-only reference to a live engine
//! instance. Release consumes it, so safe-Rust callers cannot use a
//! handle after release or release it twice. FFI callers hold only the raw
//! id; for them the slot registry keeps a tombstone after release, so a
//! stale id produces a reported transport error rather than touching
//! freed state.

use crate::error::{ClientError, ClientResult};
use lockbox_engine::{Engine, Settings};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Move-only reference to a live engine instance.
///
/// Deliberately neither `Clone` nor `Copy`: exactly one logical owner.
#[derive(Debug, PartialEq, Eq)]
pub struct Handle {
    id: u64,
}

impl Handle {
    /// The raw id, for passing across a foreign-function boundary. The
    /// receiver becomes responsible for eventually calling
    /// [`HandleManager::release_raw`].
    #[must_use]
    pub fn into_raw(self) -> u64 {
        self.id
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

enum Slot {
    Live(Arc<Mutex<Engine>>),
    /// Tombstone: the engine was released; the id is never reused.
    Released,
}

/// Creates engine instances and mediates every call into them.
///
/// One manager can own many handles. Each handle's engine sits behind its
/// own mutex, which serializes accidental concurrent use of a single
/// handle; callers are still expected to issue one call at a time per
/// handle.
pub struct HandleManager {
    next_id: AtomicU64,
    slots: Mutex<HashMap<u64, Slot>>,
}

impl Default for HandleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Id 0 is reserved as the FFI failure sentinel.
            next_id: AtomicU64::new(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Allocates an engine from settings. Never fails for schema-valid
    /// settings; `state_path` triggers an immediate restore attempt.
    pub fn initialize(
        &self,
        settings: Settings,
        state_path: Option<PathBuf>,
    ) -> ClientResult<Handle> {
        let engine = match state_path {
            Some(path) => Engine::with_state_path(settings, path),
            None => Engine::new(settings),
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| ClientError::Initialization("handle registry poisoned".into()))?;
        slots.insert(id, Slot::Live(Arc::new(Mutex::new(engine))));
        debug!(handle = id, "engine initialized");
        Ok(Handle { id })
    }

    /// One blocking round trip across the boundary for a live handle.
    pub fn invoke(&self, handle: &Handle, document: &str) -> ClientResult<String> {
        self.invoke_raw(handle.id(), document)
    }

    /// Raw-id variant of [`HandleManager::invoke`] for FFI callers.
    pub fn invoke_raw(&self, id: u64, document: &str) -> ClientResult<String> {
        let engine = self.live_engine(id)?;
        let mut engine = engine
            .lock()
            .map_err(|_| ClientError::Transport(format!("engine mutex poisoned for handle {id}")))?;
        Ok(engine.execute(document))
    }

    /// Clears the in-memory session for a live handle. State-file deletion
    /// is explicit, never automatic.
    pub fn logout(&self, handle: &Handle, delete_state_file: bool) -> ClientResult<()> {
        let engine = self.live_engine(handle.id())?;
        let mut engine = engine.lock().map_err(|_| {
            ClientError::Transport(format!(
                "engine mutex poisoned for handle {}",
                handle.id()
            ))
        })?;
        engine
            .logout(delete_state_file)
            .map_err(|e| ClientError::Application(e.envelope_message()))
    }

    /// Exactly-once teardown. Consumes the handle; the id becomes a
    /// tombstone and is never reused.
    pub fn release(&self, handle: Handle) -> ClientResult<()> {
        self.release_raw(handle.into_raw())
    }

    /// Raw-id variant of [`HandleManager::release`] for FFI callers.
    /// Releasing an already-released or unknown id is rejected with a
    /// transport error; the underlying engine is never freed twice.
    pub fn release_raw(&self, id: u64) -> ClientResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| ClientError::Transport("handle registry poisoned".into()))?;
        match slots.insert(id, Slot::Released) {
            Some(Slot::Live(engine)) => {
                drop(engine);
                debug!(handle = id, "engine released");
                Ok(())
            }
            Some(Slot::Released) => {
                warn!(handle = id, "double release rejected");
                Err(ClientError::Transport(format!(
                    "handle {id} already released"
                )))
            }
            None => {
                // Unknown id: remove the tombstone we just planted so the
                // registry only tracks ids it issued.
                slots.remove(&id);
                Err(ClientError::Transport(format!("unknown handle {id}")))
            }
        }
    }

    /// Number of live handles. Useful for leak checks in tests and hosts.
    pub fn live_count(&self) -> usize {
        self.slots
            .lock()
            .map(|slots| {
                slots
                    .values()
                    .filter(|slot| matches!(slot, Slot::Live(_)))
                    .count()
            })
            .unwrap_or(0)
    }

    fn live_engine(&self, id: u64) -> ClientResult<Arc<Mutex<Engine>>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| ClientError::Transport("handle registry poisoned".into()))?;
        match slots.get(&id) {
            Some(Slot::Live(engine)) => Ok(Arc::clone(engine)),
            Some(Slot::Released) => Err(ClientError::Transport(format!(
                "handle {id} used after release"
            ))),
            None => Err(ClientError::Transport(format!("unknown handle {id}"))),
        }
    }
}
