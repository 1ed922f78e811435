//! Detail overlay for an opened card.

use ratatui::widgets::Clear;
use trendlens_core::format::{format_count_opt, format_ranking_change};

use super::*;
use crate::app::DetailItem;

/// Render the modal overlay for the open detail, on top of the section.
pub(super) fn render_detail_overlay(frame: &mut Frame, app: &App) {
    let Some(detail) = &app.detail else {
        return;
    };

    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", detail.item.title()))
        .title_style(Style::default().fg(Color::Cyan).bold())
        .title_bottom(" Esc to close ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Min(4),    // Stats
        Constraint::Length(6), // Insight
    ])
    .split(inner);

    let stats = Paragraph::new(stat_lines(&detail.item)).wrap(Wrap { trim: false });
    frame.render_widget(stats, chunks[0]);

    render_insight_block(frame, detail.insight.as_deref(), chunks[1]);
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<16}", label), Style::default().fg(LABEL_COLOR)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn stage_line(stage: LifecycleStage) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<16}", "Lifecycle:"),
            Style::default().fg(LABEL_COLOR),
        ),
        Span::styled(stage.label(), Style::default().fg(stage_color(stage)).bold()),
    ])
}

fn categories_value(categories: &[String]) -> String {
    if categories.is_empty() {
        "—".to_string()
    } else {
        categories.join(", ")
    }
}

fn stat_lines(item: &DetailItem) -> Vec<Line<'static>> {
    match item {
        DetailItem::Hashtag(tag) => {
            let mut lines = vec![
                stat_line("Rank:", format!("#{}", tag.rank)),
                stat_line("Posts:", format_count_opt(tag.post_count)),
                stage_line(tag.lifecycle_stage),
                stat_line(
                    "Ranking Change:",
                    format_ranking_change(tag.ranking_direction, tag.ranking_change),
                ),
            ];
            if let Some(momentum) = &tag.period_momentum {
                lines.push(stat_line("Momentum:", momentum.clone()));
            }
            lines.push(stat_line("Categories:", categories_value(&tag.categories)));
            lines
        }
        DetailItem::Song { song, breakout } => {
            let rank = if *breakout {
                "Breakout".to_string()
            } else {
                song.rank.map(|r| format!("#{}", r)).unwrap_or_else(|| "—".to_string())
            };
            let mut lines = vec![
                stat_line("Artist:", song.artist_display().to_string()),
                stat_line("Rank:", rank),
                stat_line("Posts:", format_count_opt(song.post_count)),
                stage_line(song.lifecycle_stage),
            ];
            if !*breakout {
                lines.push(stat_line(
                    "Ranking Change:",
                    format_ranking_change(song.ranking_direction, song.ranking_change),
                ));
            }
            lines.push(stat_line("Categories:", categories_value(&song.categories)));
            lines
        }
        DetailItem::Cluster(cluster) => {
            let mut lines = vec![
                stat_line("Members:", format!("{} hashtags", cluster.size)),
                stat_line("Trend Strength:", cluster.strength_display()),
                stat_line("Categories:", categories_value(&cluster.categories)),
                Line::raw(""),
            ];
            for member in &cluster.items {
                lines.push(Line::from(vec![
                    Span::styled("   • ", Style::default().fg(DIM)),
                    Span::styled(
                        member.hashtag.clone(),
                        Style::default().fg(Color::White).bold(),
                    ),
                    Span::styled(
                        format!("  (rank {})", member.rank),
                        Style::default().fg(DIM),
                    ),
                ]));
            }
            lines
        }
        DetailItem::Emerging(trend) => vec![
            stat_line("Type:", trend.kind.label().to_string()),
            stat_line("Confidence:", format!("{}%", trend.confidence)),
            stat_line("Posts:", format_count_opt(trend.post_count)),
            stat_line("Categories:", categories_value(&trend.categories)),
        ],
    }
}

/// The insight panel inside the overlay: "analyzing" until the delay
/// elapses, then the templated text.
fn render_insight_block(frame: &mut Frame, insight: Option<&str>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_INSIGHT))
        .title(" Insight ")
        .title_style(Style::default().fg(BORDER_INSIGHT).bold());

    let paragraph = match insight {
        Some(text) => Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true }),
        None => Paragraph::new("Analyzing trend data...")
            .style(Style::default().fg(DIM).italic()),
    };
    frame.render_widget(paragraph.block(block), area);
}

/// A rect centered in `r`, `percent_x` wide and `percent_y` tall.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
