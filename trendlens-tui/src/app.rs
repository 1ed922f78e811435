//! Application state for the TUI.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;
use trendlens_core::config::UiConfig;
use trendlens_core::insight::{generate_panels, item_insight};
use trendlens_core::summary::LifecycleCounts;
use trendlens_core::{
    Cluster, DashboardSummary, EmergingTrend, Hashtag, InsightPanels, LifecycleStage,
    SnapshotSource, Song, TrendKind, TrendSnapshot,
};

/// Status text shown when the snapshot cannot be loaded.
pub const LOAD_FAILURE_TEXT: &str = "Failed to load trend data";

/// Top-level dashboard section. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Dashboard,
    Hashtags,
    Songs,
    Insights,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Hashtags,
        Section::Songs,
        Section::Insights,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Hashtags => "Hashtags",
            Section::Songs => "Songs",
            Section::Insights => "Insights",
        }
    }
}

/// Tab panes within the Hashtags section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashtagTab {
    #[default]
    SevenDay,
    ThirtyDay,
    Clusters,
}

impl HashtagTab {
    pub fn label(&self) -> &'static str {
        match self {
            HashtagTab::SevenDay => "7 Days",
            HashtagTab::ThirtyDay => "30 Days",
            HashtagTab::Clusters => "Clusters",
        }
    }

    fn next(&self) -> Self {
        match self {
            HashtagTab::SevenDay => HashtagTab::ThirtyDay,
            HashtagTab::ThirtyDay => HashtagTab::Clusters,
            HashtagTab::Clusters => HashtagTab::SevenDay,
        }
    }
}

/// Tab panes within the Songs section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SongTab {
    #[default]
    Trending,
    Breakout,
}

impl SongTab {
    pub fn label(&self) -> &'static str {
        match self {
            SongTab::Trending => "Trending",
            SongTab::Breakout => "Breakout",
        }
    }

    fn next(&self) -> Self {
        match self {
            SongTab::Trending => SongTab::Breakout,
            SongTab::Breakout => SongTab::Trending,
        }
    }
}

/// The full record behind an opened card.
#[derive(Debug, Clone)]
pub enum DetailItem {
    Hashtag(Hashtag),
    Cluster(Cluster),
    Song { song: Song, breakout: bool },
    Emerging(EmergingTrend),
}

impl DetailItem {
    /// Overlay title: hashtag text, or "song — artist" for songs.
    pub fn title(&self) -> String {
        match self {
            DetailItem::Hashtag(h) => h.hashtag.clone(),
            DetailItem::Cluster(c) => c.title(),
            DetailItem::Song { song, .. } => song.detail_title(),
            DetailItem::Emerging(t) => t.item.clone(),
        }
    }

    /// Inputs for the templated insight. Items without a lifecycle stage
    /// (clusters, emerging trends) fall back to stable, the same
    /// absence-means-default rule the rest of the dashboard uses.
    fn insight_inputs(&self) -> (String, TrendKind, LifecycleStage, Option<&str>) {
        match self {
            DetailItem::Hashtag(h) => (
                h.hashtag.clone(),
                TrendKind::Hashtag,
                h.lifecycle_stage,
                h.categories.first().map(String::as_str),
            ),
            DetailItem::Cluster(c) => (
                c.title(),
                TrendKind::Hashtag,
                LifecycleStage::Stable,
                c.categories.first().map(String::as_str),
            ),
            DetailItem::Song { song, .. } => (
                song.song_name.clone(),
                TrendKind::Song,
                song.lifecycle_stage,
                song.categories.first().map(String::as_str),
            ),
            DetailItem::Emerging(t) => (
                t.item.clone(),
                t.kind,
                LifecycleStage::Stable,
                t.categories.first().map(String::as_str),
            ),
        }
    }
}

/// State of the detail overlay.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub item: DetailItem,
    /// Insight text, populated after the artificial analysis delay
    pub insight: Option<String>,
    insight_ready_at: Instant,
}

/// Main application state.
pub struct App {
    /// Where the snapshot comes from
    source: SnapshotSource,
    /// Artificial UI delays
    ui: UiConfig,
    /// Current snapshot; replaced wholesale on each successful load
    pub snapshot: TrendSnapshot,
    /// Derived values, recomputed on each successful load
    pub summary: DashboardSummary,
    pub lifecycle: LifecycleCounts,
    pub panels: InsightPanels,
    /// Section and per-section tab state
    pub section: Section,
    pub hashtag_tab: HashtagTab,
    pub song_tab: SongTab,
    /// Selection within the visible list
    pub table_state: TableState,
    /// Detail overlay, when open
    pub detail: Option<DetailState>,
    /// Pending manual refresh deadline; `Some` means the busy label shows
    refresh_due_at: Option<Instant>,
    /// Whether the last load failed
    pub load_failed: bool,
    /// Status-line text: snapshot timestamp, or the failure message
    pub last_updated_display: String,
    /// When the current snapshot was loaded (for the relative display)
    pub loaded_at: Option<DateTime<Utc>>,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App. The snapshot starts empty; call [`App::reload`]
    /// to populate it.
    pub fn new(source: SnapshotSource, ui: UiConfig) -> Self {
        Self {
            source,
            ui,
            snapshot: TrendSnapshot::default(),
            summary: DashboardSummary::default(),
            lifecycle: LifecycleCounts::default(),
            panels: InsightPanels::default(),
            section: Section::default(),
            hashtag_tab: HashtagTab::default(),
            song_tab: SongTab::default(),
            table_state: TableState::default(),
            detail: None,
            refresh_due_at: None,
            load_failed: false,
            last_updated_display: String::new(),
            loaded_at: None,
            should_quit: false,
        }
    }

    // ========== Loading ==========

    /// Load the snapshot from the source. On success the snapshot is
    /// replaced and every derived value recomputed, in fixed order:
    /// summary, lifecycle buckets, insight panels, timestamp display. On
    /// failure the previous snapshot stays untouched and the status line
    /// switches to the error state.
    pub fn reload(&mut self) {
        match self.source.load() {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.summary = DashboardSummary::from_snapshot(&self.snapshot);
                self.lifecycle = LifecycleCounts::from_snapshot(&self.snapshot);
                self.panels = generate_panels(&self.snapshot);
                self.last_updated_display = self
                    .snapshot
                    .last_updated
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                self.load_failed = false;
                self.loaded_at = Some(Utc::now());
                self.clamp_selection();
                tracing::info!(
                    trends = self.summary.total_trends,
                    emerging = self.summary.emerging_count,
                    "Snapshot loaded"
                );
            }
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "Snapshot load failed");
                self.load_failed = true;
                self.last_updated_display = LOAD_FAILURE_TEXT.to_string();
            }
        }
    }

    /// Start a manual refresh: show the busy label for the configured
    /// delay, then reload. A second request while one is pending simply
    /// restarts the timer.
    pub fn request_refresh(&mut self, now: Instant) {
        self.refresh_due_at = Some(now + Duration::from_millis(self.ui.refresh_busy_ms));
    }

    /// Whether a refresh is pending (the busy label is showing).
    pub fn is_refreshing(&self) -> bool {
        self.refresh_due_at.is_some()
    }

    /// Advance the refresh and insight timers.
    pub fn tick(&mut self, now: Instant) {
        if let Some(due) = self.refresh_due_at {
            if now >= due {
                self.refresh_due_at = None;
                self.reload();
            }
        }

        // Reveal the insight text once its delay has elapsed
        if let Some(detail) = &mut self.detail {
            if detail.insight.is_none() && now >= detail.insight_ready_at {
                let (title, kind, stage, category) = detail.item.insight_inputs();
                detail.insight = Some(item_insight(&title, kind, stage, category));
            }
        }
    }

    // ========== Input ==========

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.detail.is_some() {
            self.handle_detail_key(key);
        } else {
            self.handle_section_key(key);
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.detail = None;
            }
            _ => {}
        }
    }

    fn handle_section_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('1') => self.set_section(Section::Dashboard),
            KeyCode::Char('2') => self.set_section(Section::Hashtags),
            KeyCode::Char('3') => self.set_section(Section::Songs),
            KeyCode::Char('4') => self.set_section(Section::Insights),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_section(1),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_section(-1),
            KeyCode::Tab => self.cycle_tab(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('r') => self.request_refresh(Instant::now()),
            _ => {}
        }
    }

    // ========== Navigation ==========

    /// Switch sections. Selecting the active section is a no-op; the
    /// section's own tab state survives the round trip.
    pub fn set_section(&mut self, section: Section) {
        if self.section == section {
            return;
        }
        self.section = section;
        self.reset_selection();
    }

    fn cycle_section(&mut self, step: i32) {
        let current = Section::ALL
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0) as i32;
        let len = Section::ALL.len() as i32;
        let next = (current + step).rem_euclid(len) as usize;
        self.set_section(Section::ALL[next]);
    }

    /// Cycle the tab within the current section. Sections without tabs
    /// ignore the key.
    pub fn cycle_tab(&mut self) {
        match self.section {
            Section::Hashtags => {
                self.hashtag_tab = self.hashtag_tab.next();
                self.reset_selection();
            }
            Section::Songs => {
                self.song_tab = self.song_tab.next();
                self.reset_selection();
            }
            Section::Dashboard | Section::Insights => {}
        }
    }

    /// Length of the list the current section/tab displays.
    pub fn current_list_len(&self) -> usize {
        match self.section {
            Section::Dashboard => self.snapshot.emerging_trends.len(),
            Section::Hashtags => match self.hashtag_tab {
                HashtagTab::SevenDay => self.snapshot.hashtags_7d.len(),
                HashtagTab::ThirtyDay => self.snapshot.hashtags_30d.len(),
                HashtagTab::Clusters => self.snapshot.hashtag_clusters.len(),
            },
            Section::Songs => match self.song_tab {
                SongTab::Trending => self.snapshot.trending_songs.len(),
                SongTab::Breakout => self.snapshot.breakout_songs.len(),
            },
            Section::Insights => 0,
        }
    }

    fn reset_selection(&mut self) {
        self.table_state = TableState::default();
        if self.current_list_len() > 0 {
            self.table_state.select(Some(0));
        }
    }

    /// Keep the selection valid after the snapshot is replaced.
    fn clamp_selection(&mut self) {
        let len = self.current_list_len();
        match self.table_state.selected() {
            Some(_) if len == 0 => {
                self.table_state.select(None);
            }
            Some(i) if i >= len => {
                self.table_state.select(Some(len - 1));
            }
            None if len > 0 => {
                self.table_state.select(Some(0));
            }
            _ => {}
        }
    }

    /// Select the next row in the visible list.
    fn select_next(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Select the previous row in the visible list.
    fn select_previous(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_first(&mut self) {
        if self.current_list_len() > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let len = self.current_list_len();
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    // ========== Detail overlay ==========

    /// Open the detail overlay for the selected row. The insight block
    /// stays in its "analyzing" state until the configured delay elapses.
    fn open_detail(&mut self) {
        let Some(idx) = self.table_state.selected() else {
            return;
        };

        let item = match self.section {
            Section::Dashboard => self
                .snapshot
                .emerging_trends
                .get(idx)
                .cloned()
                .map(DetailItem::Emerging),
            Section::Hashtags => match self.hashtag_tab {
                HashtagTab::SevenDay => self
                    .snapshot
                    .hashtags_7d
                    .get(idx)
                    .cloned()
                    .map(DetailItem::Hashtag),
                HashtagTab::ThirtyDay => self
                    .snapshot
                    .hashtags_30d
                    .get(idx)
                    .cloned()
                    .map(DetailItem::Hashtag),
                HashtagTab::Clusters => self
                    .snapshot
                    .hashtag_clusters
                    .get(idx)
                    .cloned()
                    .map(DetailItem::Cluster),
            },
            Section::Songs => match self.song_tab {
                SongTab::Trending => {
                    self.snapshot.trending_songs.get(idx).cloned().map(|song| {
                        DetailItem::Song {
                            song,
                            breakout: false,
                        }
                    })
                }
                SongTab::Breakout => {
                    self.snapshot.breakout_songs.get(idx).cloned().map(|song| {
                        DetailItem::Song {
                            song,
                            breakout: true,
                        }
                    })
                }
            },
            Section::Insights => None,
        };

        if let Some(item) = item {
            self.detail = Some(DetailState {
                item,
                insight: None,
                insight_ready_at: Instant::now()
                    + Duration::from_millis(self.ui.insight_delay_ms),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendData.json");
        std::fs::write(&path, FIXTURE).unwrap();
        let mut app = App::new(SnapshotSource::File(path), UiConfig::default());
        app.reload();
        (dir, app)
    }

    const FIXTURE: &str = r##"{
        "last_updated": "2026-08-28 14:00:00",
        "hashtags_7d": [
            {"hashtag": "#a", "rank": 1, "lifecycle_stage": "rising"},
            {"hashtag": "#b", "rank": 2}
        ],
        "hashtags_30d": [
            {"hashtag": "#a", "rank": 3}
        ],
        "hashtag_clusters": [
            {"id": "cluster_0", "size": 2, "trend_strength": 1,
             "items": [{"hashtag": "#a", "rank": 1}, {"hashtag": "#b", "rank": 2}]}
        ],
        "trending_songs": [
            {"song_name": "One", "artist": "A", "rank": 1, "lifecycle_stage": "rising"}
        ],
        "breakout_songs": [
            {"song_name": "Two", "lifecycle_stage": "rising"}
        ],
        "emerging_trends": [
            {"type": "hashtag", "item": "#a", "confidence": 80}
        ],
        "category_analysis": [
            {"name": "entertainment", "count": 2, "percentage": 66.7}
        ]
    }"##;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_reload_populates_derived_state() {
        let (_dir, app) = fixture_app();
        assert!(!app.load_failed);
        assert_eq!(app.summary.total_trends, 3);
        assert_eq!(app.summary.rising_trends, 2);
        assert_eq!(app.last_updated_display, "2026-08-28 14:00:00");
        assert_eq!(app.panels.forecast.len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendData.json");
        std::fs::write(&path, FIXTURE).unwrap();
        let mut app = App::new(SnapshotSource::File(path.clone()), UiConfig::default());
        app.reload();
        assert_eq!(app.summary.total_trends, 3);

        // Corrupt the file and reload: error state, data untouched
        std::fs::write(&path, "{ not json").unwrap();
        app.reload();
        assert!(app.load_failed);
        assert_eq!(app.last_updated_display, LOAD_FAILURE_TEXT);
        assert_eq!(app.summary.total_trends, 3);
        assert_eq!(app.snapshot.hashtags_7d.len(), 2);

        // A later successful load clears the error state
        std::fs::write(&path, FIXTURE).unwrap();
        app.reload();
        assert!(!app.load_failed);
        assert_eq!(app.last_updated_display, "2026-08-28 14:00:00");
    }

    #[test]
    fn test_initial_load_failure_leaves_empty_snapshot() {
        let mut app = App::new(
            SnapshotSource::File(PathBuf::from("/nonexistent/trendData.json")),
            UiConfig::default(),
        );
        app.reload();
        assert!(app.load_failed);
        assert_eq!(app.last_updated_display, LOAD_FAILURE_TEXT);
        assert_eq!(app.summary.total_trends, 0);
    }

    #[test]
    fn test_section_switch_is_noop_when_already_active() {
        let (_dir, mut app) = fixture_app();
        app.set_section(Section::Hashtags);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.table_state.selected(), Some(1));

        // Re-selecting the active section must not disturb anything
        app.set_section(Section::Hashtags);
        assert_eq!(app.section, Section::Hashtags);
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn test_tabs_are_independent_per_section() {
        let (_dir, mut app) = fixture_app();
        app.set_section(Section::Hashtags);
        app.cycle_tab();
        assert_eq!(app.hashtag_tab, HashtagTab::ThirtyDay);

        // Song tab untouched by hashtag tab changes
        app.set_section(Section::Songs);
        assert_eq!(app.song_tab, SongTab::Trending);
        app.cycle_tab();
        assert_eq!(app.song_tab, SongTab::Breakout);

        // Returning to Hashtags finds its tab where we left it
        app.set_section(Section::Hashtags);
        assert_eq!(app.hashtag_tab, HashtagTab::ThirtyDay);
    }

    #[test]
    fn test_selection_wraps_and_survives_empty_lists() {
        let (_dir, mut app) = fixture_app();
        app.set_section(Section::Hashtags);
        assert_eq!(app.current_list_len(), 2);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.table_state.selected(), Some(1));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.table_state.selected(), Some(0));

        // Insights has no list; navigation keys are inert there
        app.set_section(Section::Insights);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_enter_opens_detail_for_selected_row() {
        let (_dir, mut app) = fixture_app();
        app.set_section(Section::Songs);
        app.handle_key(key(KeyCode::Enter));
        let detail = app.detail.as_ref().expect("detail should open");
        assert_eq!(detail.item.title(), "One — A");
        assert!(detail.insight.is_none());

        // Esc closes it
        app.handle_key(key(KeyCode::Esc));
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_insight_appears_after_delay() {
        let (_dir, mut app) = fixture_app();
        app.set_section(Section::Hashtags);
        app.handle_key(key(KeyCode::Enter));

        let now = Instant::now();
        app.tick(now);
        assert!(app.detail.as_ref().unwrap().insight.is_none());

        app.tick(now + Duration::from_millis(UiConfig::default().insight_delay_ms + 10));
        let insight = app.detail.as_ref().unwrap().insight.as_ref().unwrap();
        // #a is rising, so the growth forecast is selected
        assert!(insight.contains("48 to 72 hours"));
    }

    #[test]
    fn test_refresh_busy_then_reload() {
        let (_dir, mut app) = fixture_app();
        let now = Instant::now();
        app.request_refresh(now);
        assert!(app.is_refreshing());

        app.tick(now + Duration::from_millis(10));
        assert!(app.is_refreshing());

        app.tick(now + Duration::from_millis(UiConfig::default().refresh_busy_ms + 10));
        assert!(!app.is_refreshing());
        assert!(!app.load_failed);
    }

    #[test]
    fn test_refresh_reenables_even_when_load_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendData.json");
        std::fs::write(&path, FIXTURE).unwrap();
        let mut app = App::new(SnapshotSource::File(path.clone()), UiConfig::default());
        app.reload();

        std::fs::remove_file(&path).unwrap();
        let now = Instant::now();
        app.request_refresh(now);
        app.tick(now + Duration::from_millis(UiConfig::default().refresh_busy_ms + 10));
        assert!(!app.is_refreshing());
        assert!(app.load_failed);
    }
}
