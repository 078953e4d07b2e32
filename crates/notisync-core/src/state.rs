//! Shared state enums exposed to hosts.

/// Subscription state of a [`crate::SyncEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Stopped,
    Started,
}

/// Where a [`crate::Lifecycle`] binding is relative to its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostPhase {
    Detached,
    Attached,
    TornDown,
}
