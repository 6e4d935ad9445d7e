//! Small text helpers shared by the renderers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use url::Url;

/// Body preview length used on the analysis card.
pub const DEFAULT_PREVIEW_CHARS: usize = 600;

/// Cuts `text` to at most `max_chars` characters and marks the cut with `...`.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((end, _)) => format!("{}...", text[..end].trim()),
    }
}

/// Renders a backend timestamp as e.g. `Jan 5, 2024`.
///
/// Accepts RFC 3339, naive ISO date-times and plain dates. Anything else is
/// returned unchanged; empty input yields `None`.
pub fn format_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => Some(date.format("%b %-d, %Y").to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

/// Host of `url` without a leading `www.`, lower-cased.
pub fn source_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
