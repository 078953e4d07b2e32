//! Snapshot model

use serde::{Deserialize, Serialize};

use super::NotificationRecord;

/// A complete listing of a subscriber's notifications at one point in time.
///
/// Order is whatever the source delivered (usually most recent first).
/// A snapshot replaces the previous one wholesale; it is never a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<NotificationRecord>);

impl Snapshot {
    #[must_use]
    pub const fn new(records: Vec<NotificationRecord>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn records(&self) -> &[NotificationRecord] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NotificationRecord> {
        self.0.iter()
    }
}

impl From<Vec<NotificationRecord>> for Snapshot {
    fn from(records: Vec<NotificationRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<NotificationRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = NotificationRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a NotificationRecord;
    type IntoIter = std::slice::Iter<'a, NotificationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_as_array() {
        let snapshot: Snapshot = vec![NotificationRecord::new("A", "a")].into();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.starts_with('['));

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let snapshot: Snapshot = ["C", "A", "B"]
            .into_iter()
            .map(|title| NotificationRecord::new(title, ""))
            .collect();
        let titles: Vec<&str> = snapshot.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        assert_eq!(snapshot.len(), 3);
        assert!(!snapshot.is_empty());
    }
}
