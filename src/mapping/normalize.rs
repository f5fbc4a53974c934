//! Pure value normalizers used while building a page.

use crate::constants::{SUMMARY_MAX_CHARS, TRUNCATION_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));
static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("valid year-month regex"));
static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Turns a catalog publication date into a Notion date start.
///
/// Google Books reports `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; partial dates are
/// pinned to the first day. Anything else yields `None` and the date is
/// left off the page.
pub fn to_notion_date_start(value: &str) -> Option<String> {
    let value = value.trim();
    if YEAR.is_match(value) {
        Some(format!("{}-01-01", value))
    } else if YEAR_MONTH.is_match(value) {
        Some(format!("{}-01", value))
    } else if FULL_DATE.is_match(value) {
        Some(value.to_string())
    } else {
        None
    }
}

/// Trims a description and caps it at `SUMMARY_MAX_CHARS` characters,
/// marker included. Counts characters, not bytes.
pub fn truncate_summary(description: &str) -> String {
    let description = description.trim();
    if description.chars().count() <= SUMMARY_MAX_CHARS {
        return description.to_string();
    }
    let keep = SUMMARY_MAX_CHARS - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
