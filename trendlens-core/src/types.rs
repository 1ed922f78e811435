//! Core domain types for trendlens
//!
//! These types mirror the snapshot document (`trendData.json`) produced by
//! the upstream scraping and analysis pipeline. The snapshot is read-only:
//! trendlens never computes trends, it only displays what the pipeline
//! already decided.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Snapshot** | One complete trend document; replaced wholesale on refresh |
//! | **Hashtag** | A ranked hashtag within a time window (7 or 30 days) |
//! | **Cluster** | A group of related hashtags with an aggregate strength score |
//! | **Song** | A trending (ranked) or breakout (unranked) audio track |
//! | **Emerging trend** | A cross-type candidate flagged with a confidence score |
//! | **Lifecycle stage** | Categorical trend phase: rising, growing, stable, declining |
//!
//! Every field is optional at the wire level; absence means an empty
//! collection or the documented default. Renderers therefore never fail on
//! sparse data.

use serde::{Deserialize, Deserializer};

use crate::format::parse_count;

// ============================================
// Snapshot
// ============================================

/// One complete trend snapshot.
///
/// `Default` yields an all-empty snapshot, which the UI renders as a set of
/// placeholder rows rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendSnapshot {
    /// Pipeline-formatted timestamp, display only
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Ranked hashtags over the 7-day window
    #[serde(default)]
    pub hashtags_7d: Vec<Hashtag>,
    /// Ranked hashtags over the 30-day window
    #[serde(default)]
    pub hashtags_30d: Vec<Hashtag>,
    /// Groups of related hashtags
    #[serde(default)]
    pub hashtag_clusters: Vec<Cluster>,
    /// Ranked trending songs
    #[serde(default)]
    pub trending_songs: Vec<Song>,
    /// Unranked breakout songs
    #[serde(default)]
    pub breakout_songs: Vec<Song>,
    /// Cross-type emerging-trend candidates, sorted by confidence upstream
    #[serde(default)]
    pub emerging_trends: Vec<EmergingTrend>,
    /// Category distribution, sorted descending by share upstream
    #[serde(default)]
    pub category_analysis: Vec<CategoryShare>,
}

// ============================================
// Lifecycle & ranking direction
// ============================================

/// Categorical trend phase assigned by the upstream pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Rising,
    Growing,
    #[default]
    Stable,
    Declining,
}

impl LifecycleStage {
    /// Identifier as it appears in the snapshot document
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Rising => "rising",
            LifecycleStage::Growing => "growing",
            LifecycleStage::Stable => "stable",
            LifecycleStage::Declining => "declining",
        }
    }

    /// Capitalized label for display
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStage::Rising => "Rising",
            LifecycleStage::Growing => "Growing",
            LifecycleStage::Stable => "Stable",
            LifecycleStage::Declining => "Declining",
        }
    }

    /// The four stages in their fixed chart order.
    pub const ALL: [LifecycleStage; 4] = [
        LifecycleStage::Rising,
        LifecycleStage::Growing,
        LifecycleStage::Stable,
        LifecycleStage::Declining,
    ];
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a rank move since the previous scrape.
///
/// The scraper also emits "same" and "new"; anything that is not an explicit
/// up or down collapses to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingDirection {
    Up,
    Down,
    #[default]
    #[serde(other)]
    None,
}

// ============================================
// Hashtags
// ============================================

/// A ranked hashtag within one time window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hashtag {
    /// Hashtag text, e.g. "#dancechallenge" (identifying title)
    #[serde(default)]
    pub hashtag: String,
    /// Position in the ranked list (1-based)
    #[serde(default)]
    pub rank: u32,
    /// Post volume; the scraper stores display strings like "1.2M"
    #[serde(default, deserialize_with = "de_count")]
    pub post_count: Option<u64>,
    /// Categories assigned upstream, order preserved for badges
    #[serde(default)]
    pub categories: Vec<String>,
    /// Trend phase; absent means stable
    #[serde(default)]
    pub lifecycle_stage: LifecycleStage,
    /// Direction of the rank move
    #[serde(default)]
    pub ranking_direction: RankingDirection,
    /// Magnitude of the rank move
    #[serde(default)]
    pub ranking_change: u32,
    /// Cross-window momentum: "accelerating", "decelerating", "steady", "new"
    #[serde(default)]
    pub period_momentum: Option<String>,
}

// ============================================
// Clusters
// ============================================

/// A group of related hashtags with an aggregate strength score.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cluster {
    /// Identifier in the form `cluster_<n>`
    #[serde(default)]
    pub id: String,
    /// Member count
    #[serde(default)]
    pub size: u32,
    /// How many members are rising or growing; at most `size`
    #[serde(default)]
    pub trend_strength: u32,
    /// Dominant categories of the cluster
    #[serde(default)]
    pub categories: Vec<String>,
    /// Members in cluster order, each with its own list rank
    #[serde(default)]
    pub items: Vec<ClusterMember>,
}

impl Cluster {
    /// Numeric suffix of the cluster id (`cluster_3` -> 3), if well-formed.
    pub fn number(&self) -> Option<u32> {
        self.id.rsplit('_').next()?.parse().ok()
    }

    /// Card title, e.g. "Cluster #3". Falls back to the raw id when the
    /// suffix is not numeric.
    pub fn title(&self) -> String {
        match self.number() {
            Some(n) => format!("Cluster #{}", n),
            None => self.id.clone(),
        }
    }

    /// Trend-strength ratio shown on the card, e.g. "4/5".
    pub fn strength_display(&self) -> String {
        format!("{}/{}", self.trend_strength, self.size)
    }

    /// Compact member preview for the card row, e.g. "#glowup, #skincare +2".
    /// The full ranked member list lives in the detail view.
    pub fn members_preview(&self) -> String {
        let shown: Vec<&str> = self
            .items
            .iter()
            .take(2)
            .map(|m| m.hashtag.as_str())
            .collect();
        let mut preview = shown.join(", ");
        if self.items.len() > 2 {
            preview.push_str(&format!(" +{}", self.items.len() - 2));
        }
        preview
    }
}

/// One hashtag inside a cluster.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterMember {
    #[serde(default)]
    pub hashtag: String,
    #[serde(default)]
    pub rank: u32,
}

// ============================================
// Songs
// ============================================

/// A trending or breakout song.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Song {
    /// Song title (identifying title)
    #[serde(default)]
    pub song_name: String,
    /// Performing artist, if the scraper captured one
    #[serde(default)]
    pub artist: Option<String>,
    /// Position in the trending list; breakout songs carry no rank
    #[serde(default)]
    pub rank: Option<u32>,
    /// Post volume, same wire formats as hashtags
    #[serde(default, deserialize_with = "de_count")]
    pub post_count: Option<u64>,
    /// Categories assigned upstream
    #[serde(default)]
    pub categories: Vec<String>,
    /// Trend phase; absent means stable
    #[serde(default)]
    pub lifecycle_stage: LifecycleStage,
    #[serde(default)]
    pub ranking_direction: RankingDirection,
    #[serde(default)]
    pub ranking_change: u32,
}

impl Song {
    /// Artist name for display, or the fixed fallback.
    pub fn artist_display(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown Artist")
    }

    /// Detail title in the form "song — artist".
    pub fn detail_title(&self) -> String {
        format!("{} — {}", self.song_name, self.artist_display())
    }
}

// ============================================
// Emerging trends
// ============================================

/// Which kind of item an emerging trend points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    #[default]
    Hashtag,
    Song,
}

impl TrendKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrendKind::Hashtag => "Hashtag",
            TrendKind::Song => "Song",
        }
    }
}

/// A cross-type candidate flagged with a confidence score, not yet ranked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergingTrend {
    /// Identifying text (hashtag, or "song - artist")
    #[serde(default)]
    pub item: String,
    /// What the item refers to
    #[serde(rename = "type", default)]
    pub kind: TrendKind,
    /// Categories assigned upstream
    #[serde(default)]
    pub categories: Vec<String>,
    /// Confidence percentage, clamped to 0..=100
    #[serde(default, deserialize_with = "de_confidence")]
    pub confidence: u8,
    /// Post volume, same wire formats as hashtags
    #[serde(default, deserialize_with = "de_count")]
    pub post_count: Option<u64>,
}

// ============================================
// Category distribution
// ============================================

/// One slice of the category distribution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryShare {
    #[serde(default)]
    pub name: String,
    /// Raw hashtag count behind the share
    #[serde(default)]
    pub count: u64,
    /// Share of all category assignments, 0..=100
    #[serde(default)]
    pub percentage: f64,
}

// ============================================
// Wire-format tolerance
// ============================================

/// Accept counts as integers, floats, or scraper display strings ("1.2M").
fn de_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Float(f)) if f >= 0.0 => Some(f.round() as u64),
        Some(Raw::Float(_)) => None,
        Some(Raw::Text(s)) => parse_count(&s),
    })
}

/// Accept confidence as an integer or float and clamp it into 0..=100.
fn de_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults_when_fields_absent() {
        let snapshot: TrendSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.last_updated.is_none());
        assert!(snapshot.hashtags_7d.is_empty());
        assert!(snapshot.emerging_trends.is_empty());
        assert!(snapshot.category_analysis.is_empty());
    }

    #[test]
    fn test_hashtag_missing_stage_defaults_to_stable() {
        let tag: Hashtag =
            serde_json::from_str(r##"{"hashtag": "#x", "rank": 2}"##).unwrap();
        assert_eq!(tag.lifecycle_stage, LifecycleStage::Stable);
        assert_eq!(tag.ranking_direction, RankingDirection::None);
        assert_eq!(tag.post_count, None);
    }

    #[test]
    fn test_post_count_accepts_scraper_strings() {
        let tag: Hashtag =
            serde_json::from_str(r##"{"hashtag": "#x", "post_count": "1.2M"}"##).unwrap();
        assert_eq!(tag.post_count, Some(1_200_000));

        let tag: Hashtag =
            serde_json::from_str(r##"{"hashtag": "#x", "post_count": "N/A"}"##).unwrap();
        assert_eq!(tag.post_count, None);

        let tag: Hashtag =
            serde_json::from_str(r##"{"hashtag": "#x", "post_count": 4400}"##).unwrap();
        assert_eq!(tag.post_count, Some(4400));
    }

    #[test]
    fn test_ranking_direction_tolerates_scraper_values() {
        for raw in ["\"same\"", "\"new\"", "\"none\""] {
            let dir: RankingDirection = serde_json::from_str(raw).unwrap();
            assert_eq!(dir, RankingDirection::None);
        }
        let dir: RankingDirection = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(dir, RankingDirection::Up);
    }

    #[test]
    fn test_cluster_number_and_card_strings() {
        let cluster = Cluster {
            id: "cluster_3".to_string(),
            size: 5,
            trend_strength: 4,
            ..Default::default()
        };
        assert_eq!(cluster.number(), Some(3));
        assert_eq!(cluster.title(), "Cluster #3");
        assert_eq!(cluster.strength_display(), "4/5");
    }

    #[test]
    fn test_cluster_members_preview_caps_at_two() {
        let cluster = Cluster {
            items: vec![
                ClusterMember {
                    hashtag: "#a".to_string(),
                    rank: 1,
                },
                ClusterMember {
                    hashtag: "#b".to_string(),
                    rank: 4,
                },
                ClusterMember {
                    hashtag: "#c".to_string(),
                    rank: 9,
                },
            ],
            ..Default::default()
        };
        assert_eq!(cluster.members_preview(), "#a, #b +1");
        assert_eq!(Cluster::default().members_preview(), "");
    }

    #[test]
    fn test_cluster_title_falls_back_on_malformed_id() {
        let cluster = Cluster {
            id: "weird".to_string(),
            ..Default::default()
        };
        assert_eq!(cluster.number(), None);
        assert_eq!(cluster.title(), "weird");
    }

    #[test]
    fn test_song_artist_fallback() {
        let song = Song {
            song_name: "Golden Hour".to_string(),
            ..Default::default()
        };
        assert_eq!(song.artist_display(), "Unknown Artist");
        assert_eq!(song.detail_title(), "Golden Hour — Unknown Artist");
    }

    #[test]
    fn test_confidence_clamped() {
        let trend: EmergingTrend =
            serde_json::from_str(r##"{"item": "#a", "confidence": 140}"##).unwrap();
        assert_eq!(trend.confidence, 100);

        let trend: EmergingTrend =
            serde_json::from_str(r##"{"item": "#a", "type": "song", "confidence": 90}"##)
                .unwrap();
        assert_eq!(trend.confidence, 90);
        assert_eq!(trend.kind, TrendKind::Song);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // The pipeline attaches extra metrics (numeric_post_count, growth
        // rate) that the dashboard does not display.
        let tag: Hashtag = serde_json::from_str(
            r##"{"hashtag": "#x", "rank": 1, "numeric_post_count": 9, "growth_rate": 0}"##,
        )
        .unwrap();
        assert_eq!(tag.hashtag, "#x");
    }
}
