//! Thresholds that decide when the client is allowed to call the backend.

/// Minimum trimmed length of a search query.
pub const MIN_QUERY_CHARS: usize = 2;
/// Minimum trimmed length of an article URL for extract/analyze.
pub const MIN_URL_CHARS: usize = 8;
/// Minimum length of a text body worth summarizing.
pub const MIN_SUMMARY_TEXT_CHARS: usize = 200;

/// Default recency window for fact checks.
pub const DEFAULT_FACT_CHECK_MAX_AGE_MONTHS: u32 = 18;
/// Court rulings go stale faster.
pub const COURT_FACT_CHECK_MAX_AGE_MONTHS: u32 = 12;

fn trimmed_chars(input: &str) -> usize {
    input.trim().chars().count()
}

pub fn is_query_eligible(query: &str) -> bool {
    trimmed_chars(query) >= MIN_QUERY_CHARS
}

pub fn is_url_eligible(url: &str) -> bool {
    trimmed_chars(url) >= MIN_URL_CHARS
}

pub fn is_summary_text_eligible(text: &str) -> bool {
    text.chars().count() >= MIN_SUMMARY_TEXT_CHARS
}

pub fn is_fact_check_eligible(headline: &str) -> bool {
    !headline.trim().is_empty()
}

pub fn default_fact_check_max_age(headline: &str) -> u32 {
    let lower = headline.to_lowercase();
    if lower.contains("court") || lower.contains("scotus") {
        COURT_FACT_CHECK_MAX_AGE_MONTHS
    } else {
        DEFAULT_FACT_CHECK_MAX_AGE_MONTHS
    }
}
