//! Error types for notisync-core

use thiserror::Error;

/// Result type alias using notisync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notisync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The notification source refused or failed to open a subscription
    #[error("Source error: {0}")]
    Source(String),

    /// The lifecycle binding was already torn down
    #[error("Lifecycle already torn down")]
    TornDown,

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
