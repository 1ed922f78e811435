//! Table renderers for the list-style cards.

use ratatui::{
    layout::Constraint,
    widgets::{Cell, Row, Table, TableState},
};
use trendlens_core::format::format_count_opt;
use trendlens_core::{Cluster, EmergingTrend, Hashtag, RankingDirection, Song};

use super::*;

const HIGHLIGHT_SYMBOL: &str = "▶ ";

fn list_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_STATS))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(BORDER_STATS).bold())
}

/// Empty-list placeholder, rendered inside the card's border.
fn render_placeholder(frame: &mut Frame, text: &str, block: Block, area: Rect) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(DIM).italic())
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t).style(Style::default().fg(LABEL_COLOR).bold()))
            .collect::<Vec<_>>(),
    )
    .bottom_margin(1)
}

/// Direction arrow plus magnitude, colored by direction.
fn change_cell(direction: RankingDirection, change: u32) -> Cell<'static> {
    match direction {
        RankingDirection::Up => Cell::from(format!("▲ {}", change))
            .style(Style::default().fg(stage_color(LifecycleStage::Rising))),
        RankingDirection::Down => Cell::from(format!("▼ {}", change))
            .style(Style::default().fg(stage_color(LifecycleStage::Declining))),
        RankingDirection::None => Cell::from("—").style(Style::default().fg(DIM)),
    }
}

fn stage_cell(stage: LifecycleStage) -> Cell<'static> {
    Cell::from(stage.label()).style(Style::default().fg(stage_color(stage)).bold())
}

/// Categories as bracketed badges, e.g. "[dance] [music]".
fn badge_cell(categories: &[String]) -> Cell<'static> {
    let badges: Vec<String> = categories.iter().map(|c| format!("[{}]", c)).collect();
    Cell::from(badges.join(" ")).style(Style::default().fg(BADGE_CATEGORY))
}

// ========== Hashtags ==========

fn hashtag_row(tag: &Hashtag) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("{:>3}", tag.rank)).style(Style::default().fg(DIM)),
        Cell::from(tag.hashtag.clone()).style(Style::default().fg(Color::White).bold()),
        change_cell(tag.ranking_direction, tag.ranking_change),
        Cell::from(format_count_opt(tag.post_count)),
        stage_cell(tag.lifecycle_stage),
        Cell::from(tag.period_momentum.clone().unwrap_or_default())
            .style(Style::default().fg(DIM)),
        badge_cell(&tag.categories),
    ])
}

pub(super) fn render_hashtag_table(
    frame: &mut Frame,
    label: &str,
    tags: &[Hashtag],
    state: &mut TableState,
    area: Rect,
) {
    let block = list_block(format!("Hashtags — {} ({})", label, tags.len()));

    if tags.is_empty() {
        render_placeholder(frame, "No hashtags for this window", block, area);
        return;
    }

    let rows: Vec<Row> = tags.iter().map(hashtag_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // Rank
            Constraint::Min(18),    // Hashtag
            Constraint::Length(7),  // Change
            Constraint::Length(8),  // Posts
            Constraint::Length(10), // Stage
            Constraint::Length(13), // Momentum
            Constraint::Min(12),    // Categories
        ],
    )
    .header(header_row(&[
        "#", "Hashtag", "Change", "Posts", "Stage", "Momentum", "Categories",
    ]))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(table, area, state);
}

// ========== Clusters ==========

pub(super) fn render_cluster_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let clusters = &app.snapshot.hashtag_clusters;
    let block = list_block(format!("Hashtag Clusters ({})", clusters.len()));

    if clusters.is_empty() {
        render_placeholder(frame, "No clusters detected", block, area);
        return;
    }

    let rows: Vec<Row> = clusters
        .iter()
        .map(|cluster: &Cluster| {
            Row::new(vec![
                Cell::from(cluster.title()).style(Style::default().fg(Color::White).bold()),
                Cell::from(format!("{} hashtags", cluster.size)),
                Cell::from(cluster.strength_display())
                    .style(Style::default().fg(Color::Cyan).bold()),
                Cell::from(cluster.members_preview()),
                badge_cell(&cluster.categories),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14), // Title
            Constraint::Length(14), // Size
            Constraint::Length(10), // Strength
            Constraint::Min(18),    // Member preview
            Constraint::Min(12),    // Categories
        ],
    )
    .header(header_row(&[
        "Cluster",
        "Members",
        "Strength",
        "Top Hashtags",
        "Categories",
    ]))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

// ========== Songs ==========

pub(super) fn render_song_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let breakout = app.song_tab == SongTab::Breakout;
    let songs = match app.song_tab {
        SongTab::Trending => &app.snapshot.trending_songs,
        SongTab::Breakout => &app.snapshot.breakout_songs,
    };
    let block = list_block(format!(
        "Songs — {} ({})",
        app.song_tab.label(),
        songs.len()
    ));

    if songs.is_empty() {
        render_placeholder(frame, "No songs available", block, area);
        return;
    }

    let rows: Vec<Row> = songs
        .iter()
        .map(|song: &Song| {
            // Breakouts carry no rank or rank movement; show the badge instead
            let lead = if breakout {
                Cell::from("BREAKOUT").style(Style::default().fg(BADGE_BREAKOUT).bold())
            } else {
                Cell::from(format!(
                    "{:>3}",
                    song.rank.map(|r| r.to_string()).unwrap_or_default()
                ))
                .style(Style::default().fg(DIM))
            };
            let change = if breakout {
                Cell::from("")
            } else {
                change_cell(song.ranking_direction, song.ranking_change)
            };
            Row::new(vec![
                lead,
                Cell::from(song.song_name.clone()).style(Style::default().fg(Color::White).bold()),
                Cell::from(song.artist_display().to_string())
                    .style(Style::default().fg(LABEL_COLOR)),
                change,
                Cell::from(format_count_opt(song.post_count)),
                stage_cell(song.lifecycle_stage),
                badge_cell(&song.categories),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),  // Rank / badge
            Constraint::Min(16),    // Song
            Constraint::Min(14),    // Artist
            Constraint::Length(7),  // Change
            Constraint::Length(8),  // Posts
            Constraint::Length(10), // Stage
            Constraint::Min(12),    // Categories
        ],
    )
    .header(header_row(&[
        "#", "Song", "Artist", "Change", "Posts", "Stage", "Categories",
    ]))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

// ========== Emerging trends ==========

pub(super) fn render_emerging_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let trends = &app.snapshot.emerging_trends;
    let block = list_block(format!("Emerging Trends ({})", trends.len()));

    if trends.is_empty() {
        render_placeholder(frame, "No emerging trends detected", block, area);
        return;
    }

    let rows: Vec<Row> = trends
        .iter()
        .map(|trend: &EmergingTrend| {
            Row::new(vec![
                Cell::from(trend.item.clone()).style(Style::default().fg(Color::White).bold()),
                Cell::from(trend.kind.label()).style(Style::default().fg(Color::Magenta)),
                Cell::from(format!("{}%", trend.confidence))
                    .style(Style::default().fg(Color::Cyan).bold()),
                Cell::from(format_count_opt(trend.post_count)),
                badge_cell(&trend.categories),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),    // Item
            Constraint::Length(8),  // Kind
            Constraint::Length(11), // Confidence
            Constraint::Length(8),  // Posts
            Constraint::Min(12),    // Categories
        ],
    )
    .header(header_row(&[
        "Item",
        "Type",
        "Confidence",
        "Posts",
        "Categories",
    ]))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
