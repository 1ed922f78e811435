//! Integration tests for snapshot loading and the derived dashboard data
//!
//! These tests load `tests/fixtures/trend-data.json`, a realistic snapshot
//! in the exact shape the upstream pipeline emits (string post counts,
//! extra metric fields, scraper direction values), and verify the full
//! load-then-derive flow.

use std::path::PathBuf;

use trendlens_core::insight::generate_panels_seeded;
use trendlens_core::summary::category_slices;
use trendlens_core::{
    DashboardSummary, LifecycleCounts, LifecycleStage, RankingDirection, SnapshotSource,
    TrendKind, TrendSnapshot,
};

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture() -> TrendSnapshot {
    SnapshotSource::File(fixture_path("trend-data.json"))
        .load()
        .expect("fixture should load")
}

// ============================================
// Loading
// ============================================

#[test]
fn test_fixture_parses_with_scraper_quirks() {
    let snapshot = load_fixture();

    assert_eq!(snapshot.last_updated.as_deref(), Some("2026-08-28 14:00:00"));
    assert_eq!(snapshot.hashtags_7d.len(), 4);
    assert_eq!(snapshot.hashtags_30d.len(), 1);
    assert_eq!(snapshot.trending_songs.len(), 2);
    assert_eq!(snapshot.breakout_songs.len(), 1);

    // "2.4M" string post count
    assert_eq!(snapshot.hashtags_7d[0].post_count, Some(2_400_000));
    // "N/A" post count
    assert_eq!(snapshot.hashtags_7d[3].post_count, None);
    // scraper "same" direction collapses to None
    assert_eq!(
        snapshot.hashtags_7d[2].ranking_direction,
        RankingDirection::None
    );
    // missing artist stays optional
    assert!(snapshot.trending_songs[1].artist.is_none());
    assert_eq!(snapshot.trending_songs[1].artist_display(), "Unknown Artist");
}

// ============================================
// Summary arithmetic
// ============================================

#[test]
fn test_summary_over_fixture() {
    let snapshot = load_fixture();
    let summary = DashboardSummary::from_snapshot(&snapshot);

    // 4 hashtags_7d + 2 trending songs; 30d and breakout lists do not count
    assert_eq!(summary.total_trends, 6);
    // #dancechallenge and Golden Hour are rising
    assert_eq!(summary.rising_trends, 2);
    assert_eq!(summary.top_category, "Entertainment");
    assert_eq!(summary.emerging_count, 2);
}

#[test]
fn test_lifecycle_buckets_over_fixture() {
    let snapshot = load_fixture();
    let counts = LifecycleCounts::from_snapshot(&snapshot);

    assert_eq!(counts.buckets(), [2, 1, 2, 1]);
    assert_eq!(
        counts.total(),
        snapshot.hashtags_7d.len() + snapshot.trending_songs.len()
    );
}

#[test]
fn test_category_slices_preserve_order_and_capitalize() {
    let snapshot = load_fixture();
    let slices = category_slices(&snapshot);

    assert_eq!(slices.len(), 5);
    assert_eq!(slices[0].label, "Entertainment");
    assert_eq!(slices[0].palette_index, 0);
    assert!((slices[0].percentage - 42.9).abs() < f64::EPSILON);
    assert_eq!(slices[4].label, "Music");
}

// ============================================
// Insight panels
// ============================================

#[test]
fn test_panels_over_fixture() {
    let snapshot = load_fixture();
    let panels = generate_panels_seeded(&snapshot, 99);

    assert_eq!(panels.forecast.len(), 2);
    assert_eq!(panels.forecast[0].item, "#dancechallenge");
    assert_eq!(panels.forecast[0].kind, TrendKind::Hashtag);
    assert_eq!(panels.forecast[0].confidence, 92);

    // Top two categories named, top three hashtags paired round-robin
    // with the two trending songs.
    assert!(panels.content_strategy.contains("Entertainment and Food"));
    assert!(panels.content_strategy.contains("#dancechallenge with \"Golden Hour\""));
    assert!(panels.content_strategy.contains("#airfryerrecipe with \"Slow Burn\""));
    assert!(panels.content_strategy.contains("#momlife with \"Golden Hour\""));

    assert!(panels.correlation.starts_with("1 hashtag clusters"));
}

#[test]
fn test_detail_strings_over_fixture() {
    let snapshot = load_fixture();
    let tag = &snapshot.hashtags_7d[3];

    assert_eq!(tag.lifecycle_stage, LifecycleStage::Declining);
    assert_eq!(
        trendlens_core::format::format_ranking_change(tag.ranking_direction, tag.ranking_change),
        "down 11"
    );

    let cluster = &snapshot.hashtag_clusters[0];
    assert_eq!(cluster.title(), "Cluster #0");
    assert_eq!(cluster.strength_display(), "2/2");
    assert_eq!(cluster.items[1].rank, 7);
}
