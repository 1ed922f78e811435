//! # trendlens-core
//!
//! Core library for trendlens - a terminal dashboard over pre-computed
//! social-media trend data.
//!
//! This library provides:
//! - The snapshot data model (hashtags, clusters, songs, emerging trends)
//! - Snapshot loading from a file or HTTP source
//! - Derived dashboard summaries and chart series
//! - Templated placeholder "insight" text
//! - Configuration and logging infrastructure
//!
//! ## Data flow
//!
//! All trend computation happens upstream; trendlens consumes one JSON
//! snapshot document and only formats and displays it. The snapshot is
//! replaced wholesale on each successful load, and every derived value is
//! a pure function of the current snapshot.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trendlens_core::{DashboardSummary, SnapshotSource};
//!
//! let source = SnapshotSource::from_spec("trendData.json");
//! let snapshot = source.load().expect("failed to load snapshot");
//! let summary = DashboardSummary::from_snapshot(&snapshot);
//! println!("{} trends tracked", summary.total_trends);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use insight::InsightPanels;
pub use loader::SnapshotSource;
pub use summary::{DashboardSummary, LifecycleCounts};
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod format;
pub mod insight;
pub mod loader;
pub mod logging;
pub mod summary;
pub mod types;
