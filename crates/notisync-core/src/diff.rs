//! Change detection between consecutive snapshots.
//!
//! A record is new when no record in the previous snapshot shares its
//! timestamp. Ids are not consulted, so two distinct records created at the
//! same instant mask each other, and a record missing its timestamp matches
//! any other record missing one.

use std::collections::HashSet;

use crate::models::{NotificationRecord, Snapshot, Timestamp};

/// Records in `current` judged new relative to `previous`, in `current` order.
///
/// Returns nothing when `previous` is `None`: the first snapshot of a
/// subscription is history, not news.
#[must_use]
pub fn diff(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<NotificationRecord> {
    new_records(previous, current).cloned().collect()
}

/// The first record [`diff`] would return, without scanning the rest.
#[must_use]
pub fn first_new(previous: Option<&Snapshot>, current: &Snapshot) -> Option<NotificationRecord> {
    new_records(previous, current).next().cloned()
}

fn new_records<'a>(
    previous: Option<&Snapshot>,
    current: &'a Snapshot,
) -> impl Iterator<Item = &'a NotificationRecord> {
    let seen: Option<HashSet<Option<Timestamp>>> = previous.map(|previous| {
        previous
            .iter()
            .map(NotificationRecord::occurrence_key)
            .collect()
    });

    current.iter().filter(move |record| {
        seen.as_ref()
            .is_some_and(|seen| !seen.contains(&record.occurrence_key()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(title: &str, seconds: i64) -> NotificationRecord {
        NotificationRecord::new(title, "").at(Utc.timestamp_opt(seconds, 0).unwrap())
    }

    fn titles(records: &[NotificationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn cold_start_is_never_new() {
        let current = Snapshot::new(vec![record("A", 100), record("B", 200)]);
        assert!(diff(None, &current).is_empty());
        assert_eq!(first_new(None, &current), None);
    }

    #[test]
    fn empty_current_has_nothing_new() {
        let previous = Snapshot::new(vec![record("A", 100)]);
        assert!(diff(Some(&previous), &Snapshot::default()).is_empty());
    }

    #[test]
    fn identical_timestamps_are_not_new() {
        let previous = Snapshot::new(vec![record("A", 100), record("B", 200)]);
        let reordered = Snapshot::new(vec![record("B", 200), record("A", 100)]);
        assert!(diff(Some(&previous), &reordered).is_empty());
    }

    #[test]
    fn single_new_record_is_found() {
        let previous = Snapshot::new(vec![record("A", 100)]);
        let current = Snapshot::new(vec![record("A", 100), record("B", 200)]);
        assert_eq!(titles(&diff(Some(&previous), &current)), vec!["B"]);
    }

    #[test]
    fn multiple_new_records_keep_current_order() {
        let previous = Snapshot::new(vec![record("A", 100)]);
        let current = Snapshot::new(vec![record("C", 300), record("B", 200), record("A", 100)]);
        assert_eq!(titles(&diff(Some(&previous), &current)), vec!["C", "B"]);
        assert_eq!(
            first_new(Some(&previous), &current).map(|r| r.title),
            Some("C".to_string())
        );
    }

    #[test]
    fn same_timestamp_masks_distinct_record() {
        let previous = Snapshot::new(vec![record("A", 100).with_id("a")]);
        let current = Snapshot::new(vec![
            record("A", 100).with_id("a"),
            record("Other", 100).with_id("b"),
        ]);
        assert!(diff(Some(&previous), &current).is_empty());
    }

    #[test]
    fn missing_timestamp_is_new_once() {
        let previous = Snapshot::new(vec![record("A", 100)]);
        let current = Snapshot::new(vec![record("A", 100), NotificationRecord::new("X", "")]);
        assert_eq!(titles(&diff(Some(&previous), &current)), vec!["X"]);

        let repeat = Snapshot::new(vec![NotificationRecord::new("Y", ""), record("A", 100)]);
        assert!(diff(Some(&current), &repeat).is_empty());
    }

    #[test]
    fn empty_previous_makes_everything_new() {
        let current = Snapshot::new(vec![record("A", 100)]);
        assert_eq!(titles(&diff(Some(&Snapshot::default()), &current)), vec!["A"]);
    }
}
