//! Data models for notisync

mod identity;
mod notification;
mod snapshot;

pub use identity::Identity;
pub use notification::{NotificationKind, NotificationRecord, Timestamp};
pub use snapshot::Snapshot;
