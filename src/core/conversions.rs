//! Coercions from raw CSV cell text to typed values.
//!
//! Every helper here is total: bad input maps to a fallback (`0.0`, `None`, an
//! empty string) instead of an error, so one malformed cell never aborts a load.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_NUMBER_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,_$%\s]").expect("valid regex"));
static RE_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#""+"#).expect("valid regex"));
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static RE_SUFFIX_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i),\s*(inc|corp|co|ltd|plc|llc|lp|l\.p|n\.v|s\.a|ag|se)\b")
        .expect("valid regex")
});

/// Parses a numeric cell, tolerating thousands separators, currency and percent signs.
///
/// Returns `None` for empty, unparsable or non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = RE_NUMBER_NOISE.replace_all(trimmed, "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_number`], but unparsable input becomes `0.0`.
///
/// ```
/// use esg_dashboard::core::conversions::number_or_zero;
/// assert_eq!(number_or_zero("2,500"), 2500.0);
/// assert_eq!(number_or_zero("n/a"), 0.0);
/// ```
pub fn number_or_zero(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// Parses a whole number such as a rating year (`"2023"` or `"2023.0"`).
///
/// Values with a fractional part or outside `T`'s range become `T::default()`.
pub fn whole_number_or_zero<T>(raw: &str) -> T
where
    T: TryFrom<i64> + Default,
{
    let Some(v) = parse_number(raw) else {
        return T::default();
    };
    if v.fract() != 0.0 || v.abs() >= 9.0e15 {
        return T::default();
    }
    // Bounds are checked above, the cast is exact.
    #[allow(clippy::cast_possible_truncation)]
    let whole = v as i64;
    T::try_from(whole).unwrap_or_default()
}

/// Tidies a company name for display.
///
/// Stray quotes are dropped, whitespace runs collapse to one space and the
/// comma before a corporate suffix is removed (`"Apple, Inc."` becomes
/// `"Apple Inc."`).
pub fn clean_company_name(raw: &str) -> String {
    let no_quotes = RE_QUOTES.replace_all(raw, "");
    let single_spaced = RE_WHITESPACE.replace_all(no_quotes.trim(), " ");
    RE_SUFFIX_COMMA
        .replace_all(&single_spaced, " $1")
        .trim()
        .to_string()
}

/// Parses a date cell in any of the layouts the price files have used.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, RFC 3339 timestamps, and
/// `MM/DD/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}
