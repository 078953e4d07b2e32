//! Snapshot handling shared between the engine and its source.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::diff;
use crate::models::{NotificationRecord, Snapshot};
use crate::util::lock_unpoisoned;

#[derive(Default)]
struct Baseline {
    /// Generation a sink must carry for its deliveries to be applied.
    generation: u64,
    last_known: Option<Arc<Snapshot>>,
}

pub(crate) struct Shared {
    baseline: Mutex<Baseline>,
    list_tx: broadcast::Sender<Arc<Snapshot>>,
    new_item_tx: broadcast::Sender<NotificationRecord>,
}

impl Shared {
    pub(crate) fn new(list_capacity: usize, new_item_capacity: usize) -> Self {
        let (list_tx, _) = broadcast::channel(list_capacity);
        let (new_item_tx, _) = broadcast::channel(new_item_capacity);
        Self {
            baseline: Mutex::new(Baseline::default()),
            list_tx,
            new_item_tx,
        }
    }

    /// Invalidate every outstanding sink and forget the baseline.
    ///
    /// Returns the new generation.
    pub(crate) fn advance_generation(&self) -> u64 {
        let mut baseline = lock_unpoisoned(&self.baseline);
        baseline.generation = baseline.generation.wrapping_add(1);
        baseline.last_known = None;
        baseline.generation
    }

    pub(crate) fn last_known(&self) -> Option<Arc<Snapshot>> {
        lock_unpoisoned(&self.baseline).last_known.clone()
    }

    pub(crate) fn subscribe_list(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.list_tx.subscribe()
    }

    pub(crate) fn subscribe_new_items(&self) -> broadcast::Receiver<NotificationRecord> {
        self.new_item_tx.subscribe()
    }
}

/// Callback target handed to a [`crate::NotificationSource`] on open.
///
/// Each sink is bound to the subscription it was created for. Once that
/// subscription is stopped or replaced, deliveries through the sink are
/// discarded.
#[derive(Clone)]
pub struct SnapshotSink {
    shared: Arc<Shared>,
    generation: u64,
}

impl SnapshotSink {
    pub(crate) const fn new(shared: Arc<Shared>, generation: u64) -> Self {
        Self { shared, generation }
    }

    /// Reconcile `snapshot` against the previous one and publish the result.
    ///
    /// Returns `false` if the sink's subscription is no longer current and
    /// the snapshot was discarded.
    pub fn deliver(&self, snapshot: Snapshot) -> bool {
        let mut baseline = lock_unpoisoned(&self.shared.baseline);
        if baseline.generation != self.generation {
            tracing::debug!(
                generation = self.generation,
                current = baseline.generation,
                records = snapshot.len(),
                "Discarding snapshot from stale subscription"
            );
            return false;
        }

        let new_item = diff::first_new(baseline.last_known.as_deref(), &snapshot);
        let snapshot = Arc::new(snapshot);
        tracing::debug!(
            generation = self.generation,
            records = snapshot.len(),
            new_item = new_item.is_some(),
            "Applied snapshot"
        );

        // A send only fails when nobody is observing, which is not an error.
        if let Some(record) = new_item {
            let _ = self.shared.new_item_tx.send(record);
        }
        let _ = self.shared.list_tx.send(Arc::clone(&snapshot));

        baseline.last_known = Some(snapshot);
        true
    }
}

impl std::fmt::Debug for SnapshotSink {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SnapshotSink")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
