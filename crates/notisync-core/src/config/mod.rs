//! Engine configuration.
//!
//! Provides `EngineConfig`, loaded from JSON by hosts and handed to
//! [`crate::SyncEngine::new`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::compact_text;
use crate::{Error, Result};

const DEFAULT_LIST_CAPACITY: usize = 16;
const DEFAULT_NEW_ITEM_CAPACITY: usize = 16;

/// Tuning knobs for a [`crate::SyncEngine`].
///
/// Capacities bound how many undelivered values each broadcast channel keeps
/// per observer before a slow observer starts lagging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_list_capacity")]
    pub list_capacity: usize,
    #[serde(default = "default_new_item_capacity")]
    pub new_item_capacity: usize,
}

const fn default_list_capacity() -> usize {
    DEFAULT_LIST_CAPACITY
}

const fn default_new_item_capacity() -> usize {
    DEFAULT_NEW_ITEM_CAPACITY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            list_capacity: DEFAULT_LIST_CAPACITY,
            new_item_capacity: DEFAULT_NEW_ITEM_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from a raw JSON payload.
    pub fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload).map_err(|error| {
            Error::Config(format!(
                "invalid engine config JSON: {}",
                compact_text(&error.to_string())
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No engine config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Reject capacities the broadcast channels cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.list_capacity == 0 {
            return Err(Error::Config(
                "list_capacity must be greater than zero".to_string(),
            ));
        }
        if self.new_item_capacity == 0 {
            return Err(Error::Config(
                "new_item_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
