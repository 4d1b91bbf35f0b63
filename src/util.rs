// Parsing and display helpers.
//
// The loader leans on the parsers here so the rest of the crate only ever
// sees typed values; the formatters are shared by the console front end.
use num_format::{Locale, ToFormattedString};

/// Parse a non-negative integer count from a CSV cell.
///
/// - Trims whitespace.
/// - Rejects values with alphabetic characters or a sign.
/// - Strips thousands separators (`,` and `.`) before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_u64_safe(s: Option<&str>) -> Option<u64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic() || c == '-' || c == '+') {
        return None;
    }
    let s = s.replace([',', '.'], "");
    s.parse::<u64>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Trimmed text, or `None` when the cell is missing or blank.
pub fn clean_text(s: Option<String>) -> Option<String> {
    let s = s?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Indonesian grouping, e.g. `12.345`.
    n.to_formatted_string(&Locale::id)
}

/// Headline format used on the KPI cards: `1.2jt`, `3.4rb`, or the plain
/// grouped integer below one thousand.
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}jt", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}rb", n as f64 / 1e3)
    } else {
        format_int(n)
    }
}

/// Cut `s` to at most `max` characters, ending in `…` when shortened.
pub fn truncate_display(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}
