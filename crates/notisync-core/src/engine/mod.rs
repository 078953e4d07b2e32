//! Live notification sync engine.
//!
//! [`SyncEngine`] keeps at most one subscription open on a
//! [`NotificationSource`], reconciles every delivered snapshot against the
//! previous one, and fans the results out to any number of [`Feed`]s:
//!
//! - the list feed receives every applied snapshot,
//! - the new-item feed receives at most one record per snapshot, the first
//!   one the change detector judged new.
//!
//! Stopping (or restarting for another identity) invalidates the old
//! subscription's [`SnapshotSink`], so deliveries racing with or arriving
//! after `stop()` are dropped instead of published.

mod feed;
mod sink;

use std::sync::{Arc, Mutex};

pub use feed::{Feed, FeedError};
pub use sink::SnapshotSink;

use crate::config::EngineConfig;
use crate::models::{Identity, NotificationRecord, Snapshot};
use crate::source::{NotificationSource, SourceHandle};
use crate::state::EngineState;
use crate::util::lock_unpoisoned;
use crate::Result;
use sink::Shared;

struct ActiveSubscription {
    identity: Identity,
    handle: SourceHandle,
}

/// Reconciles pushed notification snapshots and publishes the results.
pub struct SyncEngine {
    source: Arc<dyn NotificationSource>,
    shared: Arc<Shared>,
    active: Mutex<Option<ActiveSubscription>>,
}

impl SyncEngine {
    /// Create a stopped engine over `source`.
    ///
    /// Capacities of zero are raised to one; use [`EngineConfig::validate`]
    /// to reject them up front.
    pub fn new(source: Arc<dyn NotificationSource>, config: &EngineConfig) -> Self {
        Self {
            source,
            shared: Arc::new(Shared::new(
                config.list_capacity.max(1),
                config.new_item_capacity.max(1),
            )),
            active: Mutex::new(None),
        }
    }

    /// Open a subscription for `identity`.
    ///
    /// Already started for the same identity: nothing happens. Started for
    /// another identity: the old subscription is closed and its baseline
    /// dropped before the new one opens. If the source refuses to open, the
    /// engine is left stopped.
    ///
    /// The subscription lock is held across the source's `open` and `close`,
    /// so [`Self::state`] and [`Self::identity`] wait for them. Deliveries
    /// only take the baseline lock and are never blocked by it.
    pub fn start(&self, identity: Identity) -> Result<()> {
        let mut active = lock_unpoisoned(&self.active);
        if let Some(current) = active.as_ref() {
            if current.identity == identity {
                tracing::debug!(identity = %identity, "Already subscribed");
                return Ok(());
            }
        }
        if let Some(previous) = active.take() {
            tracing::info!(
                from = %previous.identity,
                to = %identity,
                "Switching notification subscription"
            );
            self.close(previous);
        }

        let generation = self.shared.advance_generation();
        let sink = SnapshotSink::new(Arc::clone(&self.shared), generation);
        match self.source.open(&identity, sink) {
            Ok(handle) => {
                tracing::info!(identity = %identity, %handle, generation, "Started notification sync");
                *active = Some(ActiveSubscription { identity, handle });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(identity = %identity, "Failed to open notification source: {error}");
                self.shared.advance_generation();
                Err(error)
            }
        }
    }

    /// Close the open subscription, if any. Safe to call repeatedly.
    pub fn stop(&self) {
        let mut active = lock_unpoisoned(&self.active);
        match active.take() {
            Some(previous) => {
                tracing::info!(identity = %previous.identity, handle = %previous.handle, "Stopped notification sync");
                self.close(previous);
            }
            None => tracing::trace!("Stop requested while already stopped"),
        }
    }

    fn close(&self, subscription: ActiveSubscription) {
        // Invalidate first so a delivery already in flight cannot publish
        // once the source is told to close.
        self.shared.advance_generation();
        self.source.close(subscription.handle);
    }

    pub fn state(&self) -> EngineState {
        if lock_unpoisoned(&self.active).is_some() {
            EngineState::Started
        } else {
            EngineState::Stopped
        }
    }

    /// Identity of the open subscription.
    pub fn identity(&self) -> Option<Identity> {
        lock_unpoisoned(&self.active)
            .as_ref()
            .map(|active| active.identity.clone())
    }

    /// The most recently applied snapshot of the open subscription.
    pub fn current_list(&self) -> Option<Arc<Snapshot>> {
        self.shared.last_known()
    }

    /// Attach a new observer of the full ordered list.
    pub fn list_feed(&self) -> Feed<Arc<Snapshot>> {
        Feed::new(self.shared.subscribe_list())
    }

    /// Attach a new observer of banner-worthy new items.
    pub fn new_item_feed(&self) -> Feed<NotificationRecord> {
        Feed::new(self.shared.subscribe_new_items())
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
