//! Error types for trendlens-core

use thiserror::Error;

/// Main error type for the trendlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error reading a local snapshot file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document failed to parse
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP fetch of a remote snapshot failed
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for trendlens-core
pub type Result<T> = std::result::Result<T, Error>;
