//! notisync-core - Core library for notisync
//!
//! This crate contains the notification models, the snapshot change
//! detector, and the sync engine that turns a push source into a live list
//! plus at-most-once "new notification" events.

pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod source;
pub mod state;
pub mod util;

pub use config::EngineConfig;
pub use engine::{Feed, FeedError, SnapshotSink, SyncEngine};
pub use error::{Error, Result};
pub use lifecycle::Lifecycle;
pub use models::{Identity, NotificationKind, NotificationRecord, Snapshot};
pub use source::{MemorySource, NotificationSource, SourceHandle};
pub use state::{EngineState, HostPhase};
