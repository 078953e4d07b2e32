//! Notification record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time a notification was created at.
pub type Timestamp = DateTime<Utc>;

/// Why the notification was sent, as tagged by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Won,
    Lost,
    Replacement,
    #[serde(other)]
    Other,
}

/// One notification as delivered by the source.
///
/// Every field is optional on the wire; a record without a timestamp is
/// still accepted and flows through change detection with `None` as its
/// identity surrogate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Stable identifier assigned by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Recipient of the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Event this notification refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotificationKind>,
    /// Creation time, used as the identity surrogate when diffing snapshots
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl NotificationRecord {
    /// Create a record with the given title and message and no timestamp.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_event(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Creation time in Unix milliseconds, or `0` when the timestamp is missing.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.map_or(0, |timestamp| timestamp.timestamp_millis())
    }

    /// Key two records must share to count as the same occurrence.
    ///
    /// Only the timestamp is used. Two records without a timestamp share the
    /// key `None`.
    #[must_use]
    pub const fn occurrence_key(&self) -> Option<Timestamp> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn ts(seconds: i64) -> Timestamp {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn test_timestamp_millis() {
        let record = NotificationRecord::new("A", "").at(ts(100));
        assert_eq!(record.timestamp_millis(), 100_000);
        assert_eq!(NotificationRecord::new("B", "").timestamp_millis(), 0);
    }

    #[test]
    fn test_occurrence_key_ignores_id() {
        let a = NotificationRecord::new("A", "").with_id("1").at(ts(5));
        let b = NotificationRecord::new("B", "").with_id("2").at(ts(5));
        let c = NotificationRecord::new("A", "").with_id("1").at(ts(6));
        assert_eq!(a.occurrence_key(), b.occurrence_key());
        assert_ne!(a.occurrence_key(), c.occurrence_key());
    }

    #[test]
    fn test_missing_timestamps_share_occurrence_key() {
        let a = NotificationRecord::new("A", "");
        let b = NotificationRecord::new("B", "");
        assert_eq!(a.occurrence_key(), None);
        assert_eq!(a.occurrence_key(), b.occurrence_key());
        assert_ne!(a.occurrence_key(), b.clone().at(ts(1)).occurrence_key());
    }

    #[test]
    fn test_deserialize_wire_format() {
        let payload = r#"
        {
          "id": "n1",
          "userId": "u1",
          "title": "You won!",
          "message": "Accept your invitation",
          "eventId": "e9",
          "type": "won",
          "timestamp": "2024-11-02T10:00:00Z"
        }
        "#;

        let record: NotificationRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(
            record,
            NotificationRecord::new("You won!", "Accept your invitation")
                .with_id("n1")
                .with_user("u1")
                .with_event("e9")
                .with_kind(NotificationKind::Won)
                .at(Utc.with_ymd_and_hms(2024, 11, 2, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let record: NotificationRecord =
            serde_json::from_str(r#"{"title": "hi", "type": "waitlisted"}"#).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.message, "");
        assert_eq!(record.kind, Some(NotificationKind::Other));
        assert_eq!(record.timestamp, None);
    }
}
