//! Formatting helpers shared across UIs.

use crate::types::RankingDirection;
use chrono::{DateTime, Utc};

/// Parse a post count from the display formats the upstream scraper emits
/// ("1.2M", "54.2K", "3,400", "N/A"). Returns `None` when the value carries
/// no number.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().to_uppercase().replace(',', "");
    if cleaned.is_empty() || cleaned == "N/A" {
        return None;
    }

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('K') => (&cleaned[..cleaned.len() - 1], 1_000f64),
        Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000f64),
        Some('B') => (&cleaned[..cleaned.len() - 1], 1_000_000_000f64),
        _ => (cleaned.as_str(), 1f64),
    };

    let value: f64 = digits.trim().parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Some((value * multiplier).round() as u64)
}

/// Format a count back into the abbreviated form the dashboard displays.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000_000 {
        format!("{:.1}B", count as f64 / 1_000_000_000.0)
    } else if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format an optional count, or "N/A" when missing.
pub fn format_count_opt(count: Option<u64>) -> String {
    match count {
        Some(c) => format_count(c),
        None => "N/A".to_string(),
    }
}

/// Capitalize the first character of a category name for display.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Format a ranking change as the detail view shows it ("up 3", "down 2",
/// or an em dash when the rank did not move).
pub fn format_ranking_change(direction: RankingDirection, change: u32) -> String {
    match direction {
        RankingDirection::Up => format!("up {}", change),
        RankingDirection::Down => format!("down {}", change),
        RankingDirection::None => "—".to_string(),
    }
}

/// Format a timestamp as relative time (e.g., "2m ago").
pub fn format_relative_time(ts: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 0 {
        "just now".to_string()
    } else if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds())
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else {
        ts.format("%b %d").to_string()
    }
}
