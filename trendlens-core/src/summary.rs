//! Derived dashboard aggregates.
//!
//! Everything in this module is a pure function of one [`TrendSnapshot`];
//! nothing here mutates the snapshot or caches across loads. The dashboard
//! recomputes all of it whenever a load succeeds.

use crate::format::capitalize;
use crate::types::{LifecycleStage, TrendSnapshot};

/// The four scalar summaries shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    /// `hashtags_7d.len() + trending_songs.len()`
    pub total_trends: usize,
    /// Items across hashtags_7d and trending_songs whose stage is rising
    pub rising_trends: usize,
    /// First category_analysis entry, capitalized, or "N/A"
    pub top_category: String,
    pub emerging_count: usize,
}

impl DashboardSummary {
    pub fn from_snapshot(snapshot: &TrendSnapshot) -> Self {
        let rising_trends = snapshot
            .hashtags_7d
            .iter()
            .filter(|h| h.lifecycle_stage == LifecycleStage::Rising)
            .count()
            + snapshot
                .trending_songs
                .iter()
                .filter(|s| s.lifecycle_stage == LifecycleStage::Rising)
                .count();

        let top_category = snapshot
            .category_analysis
            .first()
            .map(|c| capitalize(&c.name))
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            total_trends: snapshot.hashtags_7d.len() + snapshot.trending_songs.len(),
            rising_trends,
            top_category,
            emerging_count: snapshot.emerging_trends.len(),
        }
    }
}

/// Lifecycle-stage distribution for the bar chart.
///
/// Counts only `hashtags_7d` and `trending_songs`, matching the original
/// dashboard; the 30-day window, clusters, breakout songs and emerging
/// trends are excluded on purpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleCounts {
    pub rising: usize,
    pub growing: usize,
    pub stable: usize,
    pub declining: usize,
}

impl LifecycleCounts {
    pub fn from_snapshot(snapshot: &TrendSnapshot) -> Self {
        let mut counts = Self::default();
        let stages = snapshot
            .hashtags_7d
            .iter()
            .map(|h| h.lifecycle_stage)
            .chain(snapshot.trending_songs.iter().map(|s| s.lifecycle_stage));

        for stage in stages {
            match stage {
                LifecycleStage::Rising => counts.rising += 1,
                LifecycleStage::Growing => counts.growing += 1,
                LifecycleStage::Stable => counts.stable += 1,
                LifecycleStage::Declining => counts.declining += 1,
            }
        }
        counts
    }

    /// Bucket values in fixed chart order: rising, growing, stable, declining.
    pub fn buckets(&self) -> [usize; 4] {
        [self.rising, self.growing, self.stable, self.declining]
    }

    pub fn total(&self) -> usize {
        self.rising + self.growing + self.stable + self.declining
    }
}

/// Number of colors in the fixed category palette. Slice indices beyond it
/// cycle (`index % PALETTE_SIZE`).
pub const PALETTE_SIZE: usize = 7;

/// One slice of the category distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// Capitalized category name
    pub label: String,
    /// Share of all category assignments, 0..=100
    pub percentage: f64,
    /// Index into the 7-color palette, already wrapped
    pub palette_index: usize,
}

/// Project `category_analysis` into chart slices, preserving upstream order.
pub fn category_slices(snapshot: &TrendSnapshot) -> Vec<CategorySlice> {
    snapshot
        .category_analysis
        .iter()
        .enumerate()
        .map(|(i, share)| CategorySlice {
            label: capitalize(&share.name),
            percentage: share.percentage,
            palette_index: i % PALETTE_SIZE,
        })
        .collect()
}
