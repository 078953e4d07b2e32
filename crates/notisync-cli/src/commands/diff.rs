use std::path::Path;

use chrono::Utc;
use notisync_core::{diff, NotificationRecord, Snapshot};

use crate::commands::common::{format_record_line, load_snapshot};
use crate::error::CliError;

/// Placeholder accepted in place of the previous snapshot path.
pub const COLD_START: &str = "-";

pub fn run_diff(previous: &str, current: &Path, as_json: bool) -> Result<(), CliError> {
    let previous = if previous.trim() == COLD_START {
        None
    } else {
        Some(load_snapshot(Path::new(previous))?)
    };
    let current = load_snapshot(current)?;
    let new_records = diff_snapshots(previous.as_ref(), &current);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&new_records)?);
        return Ok(());
    }

    for line in format_diff_lines(previous.is_none(), &new_records, Utc::now().timestamp_millis()) {
        println!("{line}");
    }
    Ok(())
}

pub fn diff_snapshots(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<NotificationRecord> {
    diff::diff(previous, current)
}

pub fn format_diff_lines(
    cold_start: bool,
    new_records: &[NotificationRecord],
    now_ms: i64,
) -> Vec<String> {
    if cold_start {
        return vec!["Cold start: nothing is new on the first snapshot.".to_string()];
    }
    if new_records.is_empty() {
        return vec!["No new notifications.".to_string()];
    }

    let mut lines = vec![format!("{} new notification(s):", new_records.len())];
    lines.extend(
        new_records
            .iter()
            .map(|record| format!("  {}", format_record_line(record, now_ms))),
    );
    lines
}
