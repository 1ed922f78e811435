//! Snapshot loading.
//!
//! The snapshot is a single JSON document produced by the upstream
//! pipeline. It is fetched whole and parsed whole; there is no partial
//! update and no retry. Callers keep their previous snapshot when a load
//! fails.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::types::TrendSnapshot;

/// Where the snapshot document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Local file, the default deployment (`trendData.json` next to the data dir)
    File(PathBuf),
    /// Remote document served over HTTP(S)
    Http(String),
}

impl SnapshotSource {
    /// Interpret a config/CLI value: `http://` and `https://` prefixes mean
    /// a remote source, anything else is a file path.
    pub fn from_spec(spec: &str) -> Self {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            SnapshotSource::Http(spec.to_string())
        } else {
            SnapshotSource::File(PathBuf::from(spec))
        }
    }

    /// Display form for logs and the status line.
    pub fn describe(&self) -> String {
        match self {
            SnapshotSource::File(path) => path.display().to_string(),
            SnapshotSource::Http(url) => url.clone(),
        }
    }

    /// Fetch and parse the snapshot.
    pub fn load(&self) -> Result<TrendSnapshot> {
        match self {
            SnapshotSource::File(path) => {
                tracing::debug!(path = %path.display(), "Loading snapshot from file");
                let raw = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            SnapshotSource::Http(url) => {
                tracing::debug!(%url, "Fetching snapshot over HTTP");
                let snapshot = reqwest::blocking::get(url)?
                    .error_for_status()?
                    .json()?;
                Ok(snapshot)
            }
        }
    }
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
