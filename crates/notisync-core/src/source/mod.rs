//! Push sources that feed snapshots into a [`crate::SyncEngine`].
//!
//! A source owns the transport. Once [`NotificationSource::open`] returns,
//! the source calls [`SnapshotSink::deliver`] from its own thread whenever the
//! backing data changes, one delivery at a time per handle, until the handle
//! is closed. Retries and backoff belong to the source; the engine never
//! reopens a subscription on its own.

mod memory;

use std::fmt;

pub use memory::MemorySource;

pub use crate::engine::SnapshotSink;
use crate::models::Identity;
use crate::Result;

/// Opaque id of one open subscription, chosen by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(u64);

impl SourceHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{}", self.0)
    }
}

/// A server-pushed collection of per-identity notification snapshots.
pub trait NotificationSource: Send + Sync {
    /// Begin delivering snapshots for `identity` into `sink`.
    fn open(&self, identity: &Identity, sink: SnapshotSink) -> Result<SourceHandle>;

    /// Stop delivery for `handle` and release its resources.
    ///
    /// Unknown or already closed handles are ignored.
    fn close(&self, handle: SourceHandle);
}
