//! Display helpers shared by the dashboard views

use chrono::{DateTime, Utc};
use std::fmt;

/// Split a comma-separated image list, skipping blanks
#[must_use]
pub fn split_image_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .collect()
}

/// Resolve a media reference returned by the API against the API origin
///
/// Relative paths come back both with and without a leading slash; absolute
/// URLs are returned untouched.
#[must_use]
pub fn resolve_media(base_url: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Severity of a report reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Minor issues, typos, outdated information
    Low,
    /// Misinformation or inappropriate content
    Medium,
    /// Hate speech, offensive content, harassment, threats
    High,
}

const HIGH_SEVERITY_TERMS: [&str; 4] = ["hate speech", "offensive content", "harassment", "threats"];
const MEDIUM_SEVERITY_TERMS: [&str; 2] = ["misinformation", "inappropriate"];

impl Severity {
    /// Classify a free-text report reason, case-insensitively
    #[must_use]
    pub fn classify(reason: &str) -> Self {
        let reason = reason.to_lowercase();
        if HIGH_SEVERITY_TERMS.iter().any(|term| reason.contains(term)) {
            Self::High
        } else if MEDIUM_SEVERITY_TERMS.iter().any(|term| reason.contains(term)) {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Short label for text output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uppercased first character of a name, used when there is no avatar
#[must_use]
pub fn initial_of(name: &str) -> Option<String> {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
}

/// Format a timestamp as `Mar 15, 2024`; missing values render empty
#[must_use]
pub fn format_short_date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |dt| dt.format("%b %-d, %Y").to_string())
}

/// Format a timestamp with time of day for table cells
#[must_use]
pub fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let keep = max.saturating_sub(1);
        let mut out: String = s.chars().take(keep).collect();
        out.push('…');
        out
    }
}
