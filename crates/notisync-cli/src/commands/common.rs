use std::path::{Path, PathBuf};

use notisync_core::{EngineConfig, NotificationRecord, Snapshot};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "NOTISYNC_CONFIG";

/// Resolve the engine config path: explicit flag, then env, then the user
/// config directory.
pub fn resolve_config_path(
    explicit: Option<PathBuf>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path);
    }
    if let Some(value) = notisync_core::util::normalize_text_option(env_value) {
        return Some(PathBuf::from(value));
    }
    dirs::config_dir().map(|dir| dir.join("notisync").join(CONFIG_FILE_NAME))
}

pub fn load_engine_config(explicit: Option<PathBuf>) -> Result<EngineConfig, CliError> {
    let env_value = std::env::var(CONFIG_ENV_VAR).ok();
    match resolve_config_path(explicit, env_value) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading engine config");
            Ok(EngineConfig::load_from_path(&path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|error| CliError::InvalidFile {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|error| CliError::InvalidFile {
        path: path.display().to_string(),
        message: notisync_core::util::compact_text(&error.to_string()),
    })
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    read_json_file(path)
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else {
        format!("{}w ago", diff / week)
    }
}

/// One-line rendering of a record for terminal output.
pub fn format_record_line(record: &NotificationRecord, now_ms: i64) -> String {
    let when = if record.timestamp.is_some() {
        format_relative_time(record.timestamp_millis(), now_ms)
    } else {
        "no timestamp".to_string()
    };

    if record.message.is_empty() {
        format!("{} ({when})", record.title)
    } else {
        format!("{}: {} ({when})", record.title, record.message)
    }
}
