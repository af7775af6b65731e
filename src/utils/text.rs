//! Small text helpers shared by ingestion and the checkers.

/// Whitespace-delimited token count.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// First `n` characters (not bytes; descriptions may carry non-ASCII).
pub fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Lowercase a header and strip everything non-alphanumeric, so that
/// "Entry Date", "entry_date" and "ENTRY-DATE" all compare equal.
pub fn normalize_header(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Parse a loosely formatted decimal: tolerates "$", thousands separators
/// and surrounding whitespace. Returns None for anything non-numeric.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Truncate for single-line table cells, appending an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
