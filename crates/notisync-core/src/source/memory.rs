//! In-process push source.
//!
//! Every open handle gets a dedicated worker thread that drains a queue of
//! snapshots into the engine, so deliveries always arrive on a thread the
//! caller does not control.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use super::{NotificationSource, SnapshotSink, SourceHandle};
use crate::models::{Identity, Snapshot};
use crate::util::lock_unpoisoned;
use crate::{Error, Result};

struct Channel {
    identity: Identity,
    sender: mpsc::UnboundedSender<Snapshot>,
}

#[derive(Default)]
struct Inner {
    next_handle: u64,
    channels: HashMap<SourceHandle, Channel>,
    fail_next_open: Option<String>,
}

/// [`NotificationSource`] backed by in-memory queues.
#[derive(Default)]
pub struct MemorySource {
    inner: Mutex<Inner>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `snapshot` for every open handle of `identity`.
    ///
    /// Returns how many handles accepted it.
    pub fn push(&self, identity: &Identity, snapshot: &Snapshot) -> usize {
        let inner = lock_unpoisoned(&self.inner);
        inner
            .channels
            .values()
            .filter(|channel| &channel.identity == identity)
            .filter(|channel| channel.sender.send(snapshot.clone()).is_ok())
            .count()
    }

    /// Queue `snapshot` for a single handle. Returns `false` if it is closed.
    pub fn push_to(&self, handle: SourceHandle, snapshot: Snapshot) -> bool {
        let inner = lock_unpoisoned(&self.inner);
        inner
            .channels
            .get(&handle)
            .is_some_and(|channel| channel.sender.send(snapshot).is_ok())
    }

    /// Number of open handles for `identity`.
    pub fn open_handles(&self, identity: &Identity) -> usize {
        let inner = lock_unpoisoned(&self.inner);
        inner
            .channels
            .values()
            .filter(|channel| &channel.identity == identity)
            .count()
    }

    /// Make the next [`NotificationSource::open`] call fail with `message`.
    pub fn fail_next_open(&self, message: impl Into<String>) {
        lock_unpoisoned(&self.inner).fail_next_open = Some(message.into());
    }
}

impl NotificationSource for MemorySource {
    fn open(&self, identity: &Identity, sink: SnapshotSink) -> Result<SourceHandle> {
        let mut inner = lock_unpoisoned(&self.inner);
        if let Some(message) = inner.fail_next_open.take() {
            return Err(Error::Source(message));
        }

        inner.next_handle += 1;
        let handle = SourceHandle::new(inner.next_handle);
        let (sender, mut receiver) = mpsc::unbounded_channel::<Snapshot>();

        std::thread::Builder::new()
            .name(format!("notisync-source-{}", handle.raw()))
            .spawn(move || {
                while let Some(snapshot) = receiver.blocking_recv() {
                    let records = snapshot.len();
                    if !sink.deliver(snapshot) {
                        tracing::trace!(%handle, records, "Delivery dropped by engine");
                    }
                }
                tracing::trace!(%handle, "Source worker exiting");
            })?;

        inner.channels.insert(
            handle,
            Channel {
                identity: identity.clone(),
                sender,
            },
        );
        tracing::debug!(%handle, identity = %identity, "Opened memory subscription");
        Ok(handle)
    }

    fn close(&self, handle: SourceHandle) {
        if lock_unpoisoned(&self.inner).channels.remove(&handle).is_some() {
            tracing::debug!(%handle, "Closed memory subscription");
        }
    }
}
