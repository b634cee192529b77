//! Error types and handling
//!
//! Common error types used across the crate. Nothing here is fatal to the
//! host: each operation boundary converts these into a sink notification
//! plus a safe return value.

use thiserror::Error;

/// Errors from loading or persisting the settings document
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed settings: {0}")]
    Malformed(String),
}

/// Result type alias using SettingsError
pub type SettingsResult<T> = Result<T, SettingsError>;
