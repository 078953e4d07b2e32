use std::io;

use notisync_core::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notisync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to read {path}: {message}")]
    InvalidFile { path: String, message: String },
    #[error("Step {step}: snapshot was not published within {wait_ms}ms")]
    Timeout { step: usize, wait_ms: u64 },
}
