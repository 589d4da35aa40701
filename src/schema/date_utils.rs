//! Date parsing and formatting for worksheet cells.
//!
//! Birth dates are typed by hand into the sheet, so parsing is lenient:
//! a list of day-first formats is tried in order, then a pattern-based
//! guess. Nothing here fails loudly; callers get `None`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format written to the sheet for dates (day/month/year)
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Format used when writing dates back to the sheet
    pub default_format: String,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                SHEET_DATE_FORMAT.to_string(), // 15/01/1970
                "%d-%m-%Y".to_string(),        // 15-01-1970
                "%Y-%m-%d".to_string(),        // 1970-01-15
                "%d.%m.%Y".to_string(),        // 15.01.1970
                "%Y%m%d".to_string(),          // 19700115
            ],
            default_format: SHEET_DATE_FORMAT.to_string(),
            enable_format_detection: true,
        }
    }
}

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
///
/// Ambiguous slash dates resolve day-first.
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d");
    }

    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d");
            } else if parts[2].len() == 4 {
                return Some("%d/%m/%Y");
            }
        }
    }

    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y");
        }
    }

    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    None
}

/// Format a date the way the sheet stores it
#[must_use]
pub fn format_sheet_date(date: NaiveDate, config: &DateFormatConfig) -> String {
    date.format(&config.default_format).to_string()
}

/// Whole years between `birth_date` and `on`
#[must_use]
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> Option<u32> {
    if on < birth_date {
        return None;
    }
    let mut years = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
