//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use trendlens_core::format::format_relative_time;
use trendlens_core::summary::category_slices;
use trendlens_core::LifecycleStage;

use crate::app::{App, HashtagTab, Section, SongTab};

mod cards;
mod detail;

// ========== Color Palette ==========

/// Fixed 7-color palette for category slices. Indices beyond it cycle.
const CATEGORY_PALETTE: [Color; 7] = [
    Color::Rgb(255, 99, 132),  // coral
    Color::Rgb(54, 162, 235),  // blue
    Color::Rgb(255, 206, 86),  // yellow
    Color::Rgb(75, 192, 192),  // teal
    Color::Rgb(153, 102, 255), // purple
    Color::Rgb(255, 159, 64),  // orange
    Color::Rgb(120, 200, 120), // green
];

/// Label color for metadata attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Border color for summary/statistic blocks
const BORDER_STATS: Color = Color::Rgb(0, 150, 150);
/// Border color for insight blocks
const BORDER_INSIGHT: Color = Color::Rgb(180, 100, 180);
/// Dim gray for secondary text and placeholders
const DIM: Color = Color::Rgb(128, 128, 128);
/// Badge color for category tags
const BADGE_CATEGORY: Color = Color::Rgb(220, 180, 0);
/// Badge color for the breakout marker
const BADGE_BREAKOUT: Color = Color::Rgb(255, 0, 255);

/// Color for a lifecycle stage.
fn stage_color(stage: LifecycleStage) -> Color {
    match stage {
        LifecycleStage::Rising => Color::Rgb(50, 205, 50),
        LifecycleStage::Growing => Color::Rgb(0, 255, 255),
        LifecycleStage::Stable => Color::Rgb(160, 160, 160),
        LifecycleStage::Declining => Color::Rgb(255, 99, 71),
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: nav header, section body, status footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Nav header
        Constraint::Min(5),    // Section body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_nav_header(frame, app, chunks[0]);

    match app.section {
        Section::Dashboard => render_dashboard(frame, app, chunks[1]),
        Section::Hashtags => render_hashtags(frame, app, chunks[1]),
        Section::Songs => render_songs(frame, app, chunks[1]),
        Section::Insights => render_insights(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);

    // Detail overlay sits on top of whatever section is visible
    if app.detail.is_some() {
        detail::render_detail_overlay(frame, app);
    }
}

// ========== Navigation ==========

/// Render the nav bar: app name plus one tab per section, active underlined.
fn render_nav_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Length(12), // App name
        Constraint::Min(1),     // Section tabs
    ])
    .split(area);

    let app_name = Paragraph::new(" trendlens").style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(app_name, chunks[0]);

    let mut spans: Vec<Span> = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == app.section {
            Style::default()
                .fg(Color::Cyan)
                .bold()
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", i + 1, section.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[1]);
}

/// Render a sub-tab bar within a section.
fn render_sub_tabs(frame: &mut Frame, labels: &[&str], active: usize, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, label) in labels.iter().enumerate() {
        let style = if i == active {
            Style::default()
                .fg(Color::Yellow)
                .bold()
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled("(Tab to switch)", Style::default().fg(DIM)));

    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

// ========== Dashboard section ==========

fn render_dashboard(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4),  // Summary cards
        Constraint::Length(10), // Charts
        Constraint::Min(4),     // Emerging trends
    ])
    .split(area);

    render_summary_cards(frame, app, chunks[0]);
    render_charts(frame, app, chunks[1]);
    cards::render_emerging_table(frame, app, chunks[2]);
}

/// Render the four summary stat cards.
fn render_summary_cards(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let cards: [(&str, String, Color); 4] = [
        (
            "Total Trends",
            app.summary.total_trends.to_string(),
            Color::Cyan,
        ),
        (
            "Rising",
            app.summary.rising_trends.to_string(),
            stage_color(LifecycleStage::Rising),
        ),
        ("Top Category", app.summary.top_category.clone(), Color::Yellow),
        (
            "Emerging",
            app.summary.emerging_count.to_string(),
            Color::Magenta,
        ),
    ];

    for (chunk, (title, value, color)) in chunks.iter().zip(cards) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_STATS))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(LABEL_COLOR));
        let value_line = Line::from(Span::styled(value, Style::default().fg(color).bold()));
        let paragraph = Paragraph::new(value_line)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *chunk);
    }
}

/// Render the category-mix and lifecycle charts side by side.
fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(area);

    render_category_chart(frame, app, chunks[0]);
    render_lifecycle_chart(frame, app, chunks[1]);
}

/// Category distribution: one colored bar per category_analysis entry.
fn render_category_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_STATS))
        .title(" Category Mix ")
        .title_style(Style::default().fg(BORDER_STATS).bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slices = category_slices(&app.snapshot);
    if slices.is_empty() {
        let placeholder = Paragraph::new("No category data")
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    let bar_width = inner.width.saturating_sub(24).max(8) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for slice in slices.iter().take(inner.height as usize) {
        let color = CATEGORY_PALETTE[slice.palette_index];
        let filled = ((slice.percentage / 100.0) * bar_width as f64).round() as usize;
        let filled = filled.min(bar_width).max(1);
        let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<14}", slice.label), Style::default().fg(Color::White)),
            Span::styled(format!("{:>5.1}% ", slice.percentage), Style::default().fg(color).bold()),
            Span::styled(bar, Style::default().fg(color)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Lifecycle distribution: four fixed horizontal bars, counted over the
/// 7-day hashtags and trending songs only.
fn render_lifecycle_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_STATS))
        .title(" Lifecycle Stages ")
        .title_style(Style::default().fg(BORDER_STATS).bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buckets = app.lifecycle.buckets();
    let max = buckets.iter().copied().max().unwrap_or(0).max(1);
    let bar_width = inner.width.saturating_sub(20).max(8) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (stage, count) in LifecycleStage::ALL.iter().zip(buckets) {
        let color = stage_color(*stage);
        let filled = ((count as f64 / max as f64) * bar_width as f64).round() as usize;
        let filled = if count == 0 { 0 } else { filled.max(1) };
        let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<10}", stage.label()), Style::default().fg(color)),
            Span::styled(format!("{:>3} ", count), Style::default().fg(Color::White).bold()),
            Span::styled(bar, Style::default().fg(color)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

// ========== Hashtags & Songs sections ==========

fn render_hashtags(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(4)]).split(area);

    let active = match app.hashtag_tab {
        HashtagTab::SevenDay => 0,
        HashtagTab::ThirtyDay => 1,
        HashtagTab::Clusters => 2,
    };
    render_sub_tabs(
        frame,
        &[
            HashtagTab::SevenDay.label(),
            HashtagTab::ThirtyDay.label(),
            HashtagTab::Clusters.label(),
        ],
        active,
        chunks[0],
    );

    match app.hashtag_tab {
        HashtagTab::SevenDay => cards::render_hashtag_table(
            frame,
            HashtagTab::SevenDay.label(),
            &app.snapshot.hashtags_7d,
            &mut app.table_state,
            chunks[1],
        ),
        HashtagTab::ThirtyDay => cards::render_hashtag_table(
            frame,
            HashtagTab::ThirtyDay.label(),
            &app.snapshot.hashtags_30d,
            &mut app.table_state,
            chunks[1],
        ),
        HashtagTab::Clusters => cards::render_cluster_table(frame, app, chunks[1]),
    }
}

fn render_songs(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(4)]).split(area);

    let active = match app.song_tab {
        SongTab::Trending => 0,
        SongTab::Breakout => 1,
    };
    render_sub_tabs(
        frame,
        &[SongTab::Trending.label(), SongTab::Breakout.label()],
        active,
        chunks[0],
    );

    cards::render_song_table(frame, app, chunks[1]);
}

// ========== Insights section ==========

fn render_insights(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Forecast
        Constraint::Min(4),    // Content strategy
        Constraint::Length(5), // Correlation
    ])
    .split(area);

    render_forecast_panel(frame, app, chunks[0]);

    let strategy = Paragraph::new(app.panels.content_strategy.clone())
        .wrap(Wrap { trim: true })
        .block(titled_insight_block(" Content Strategy "));
    frame.render_widget(strategy, chunks[1]);

    let correlation = Paragraph::new(app.panels.correlation.clone())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(titled_insight_block(" Trend Correlation "));
    frame.render_widget(correlation, chunks[2]);
}

/// Forecast panel: the top three emerging trends with confidence.
fn render_forecast_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if app.panels.forecast.is_empty() {
        lines.push(Line::styled(
            "No emerging trends to forecast.",
            Style::default().fg(DIM),
        ));
    } else {
        for (i, entry) in app.panels.forecast.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(DIM)),
                Span::styled(entry.item.clone(), Style::default().fg(Color::White).bold()),
                Span::styled(
                    format!("  {}", entry.kind.label()),
                    Style::default().fg(BADGE_CATEGORY),
                ),
                Span::styled(
                    format!("  {}% confidence", entry.confidence),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(titled_insight_block(" Trend Forecast "));
    frame.render_widget(paragraph, area);
}

fn titled_insight_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_INSIGHT))
        .title(title)
        .title_style(Style::default().fg(BORDER_INSIGHT).bold())
}

// ========== Footer ==========

/// Render the footer: key hints on the left, load status on the right.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" 1-4", Style::default().fg(Color::Yellow)),
        Span::styled(" sections  ", Style::default().fg(DIM)),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" tabs  ", Style::default().fg(DIM)),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::styled(" rows  ", Style::default().fg(DIM)),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" details  ", Style::default().fg(DIM)),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::styled(" refresh  ", Style::default().fg(DIM)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" quit  ", Style::default().fg(DIM)),
        Span::styled("│ ", Style::default().fg(DIM)),
    ];

    if app.is_refreshing() {
        spans.push(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::Yellow).italic(),
        ));
    } else if app.load_failed {
        spans.push(Span::styled(
            app.last_updated_display.clone(),
            Style::default().fg(Color::Red).bold(),
        ));
    } else {
        spans.push(Span::styled(
            format!("Updated: {}", app.last_updated_display),
            Style::default().fg(Color::White),
        ));
        if let Some(loaded_at) = app.loaded_at {
            spans.push(Span::styled(
                format!("  (loaded {})", format_relative_time(loaded_at)),
                Style::default().fg(DIM),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};
    use std::path::PathBuf;
    use trendlens_core::config::UiConfig;
    use trendlens_core::{Hashtag, SnapshotSource};

    fn empty_app() -> App {
        App::new(
            SnapshotSource::File(PathBuf::from("unused.json")),
            UiConfig::default(),
        )
    }

    /// Render one frame into a test backend and flatten it to text.
    fn render_to_text(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_emerging_list_shows_single_placeholder() {
        let mut app = empty_app();
        let text = render_to_text(&mut app);

        assert_eq!(text.matches("No emerging trends detected").count(), 1);
        assert!(text.contains("Emerging Trends (0)"));
        // No header row means no card rows either
        assert!(!text.contains("Confidence"));
    }

    #[test]
    fn test_hashtag_tabs_render_only_their_window() {
        let mut app = empty_app();
        app.snapshot.hashtags_7d.push(Hashtag {
            hashtag: "#sevenday".to_string(),
            rank: 1,
            ..Default::default()
        });
        app.snapshot.hashtags_30d.push(Hashtag {
            hashtag: "#thirtyday".to_string(),
            rank: 1,
            ..Default::default()
        });
        app.set_section(Section::Hashtags);

        let text = render_to_text(&mut app);
        assert!(text.contains("Hashtags — 7 Days (1)"));
        assert!(text.contains("#sevenday"));
        assert!(!text.contains("#thirtyday"));

        app.cycle_tab();
        let text = render_to_text(&mut app);
        assert!(text.contains("Hashtags — 30 Days (1)"));
        assert!(text.contains("#thirtyday"));
        assert!(!text.contains("#sevenday"));
    }
}
