//! Binds a [`SyncEngine`] to the lifecycle of the host showing it.
//!
//! A host (a screen, a window, a CLI session) calls [`Lifecycle::attach`]
//! when it becomes visible and [`Lifecycle::detach`] when it is hidden.
//! [`Lifecycle::teardown`] stops the engine exactly once for the lifetime of
//! the binding, whether or not the host ever attached, and runs on drop.
//! Observers attach to `lifecycle.engine()` feeds independently of all this.

use std::sync::{Arc, Mutex};

use crate::engine::SyncEngine;
use crate::models::Identity;
use crate::state::{EngineState, HostPhase};
use crate::util::lock_unpoisoned;
use crate::{Error, Result};

pub struct Lifecycle {
    engine: Arc<SyncEngine>,
    phase: Mutex<HostPhase>,
}

impl Lifecycle {
    pub const fn new(engine: Arc<SyncEngine>) -> Self {
        Self {
            engine,
            phase: Mutex::new(HostPhase::Detached),
        }
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    pub fn phase(&self) -> HostPhase {
        *lock_unpoisoned(&self.phase)
    }

    /// Host became visible: start syncing for `identity`.
    ///
    /// Attaching again with another identity restarts the engine for it.
    /// If that restart fails to open, the old subscription is already gone
    /// and the binding falls back to `Detached`.
    pub fn attach(&self, identity: Identity) -> Result<()> {
        let mut phase = lock_unpoisoned(&self.phase);
        if *phase == HostPhase::TornDown {
            return Err(Error::TornDown);
        }

        if let Err(error) = self.engine.start(identity) {
            if self.engine.state() == EngineState::Stopped {
                *phase = HostPhase::Detached;
            }
            return Err(error);
        }
        *phase = HostPhase::Attached;
        Ok(())
    }

    /// Host was hidden: stop syncing until the next attach.
    pub fn detach(&self) {
        let mut phase = lock_unpoisoned(&self.phase);
        if *phase == HostPhase::Attached {
            self.engine.stop();
            *phase = HostPhase::Detached;
        }
    }

    /// Host is going away. Stops the engine once; later calls do nothing.
    pub fn teardown(&self) {
        let mut phase = lock_unpoisoned(&self.phase);
        if *phase == HostPhase::TornDown {
            return;
        }

        tracing::debug!(was = ?*phase, "Tearing down notification lifecycle");
        self.engine.stop();
        *phase = HostPhase::TornDown;
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}
