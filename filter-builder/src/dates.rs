//! Conversions between the rule editor's `DD/MM/YYYY` dates and the
//! `YYYY-MM-DD` calendar dates used inside range bounds.

use chrono::NaiveDate;

const UI_FORMAT: &str = "%d/%m/%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a `DD/MM/YYYY` date into `YYYY-MM-DD`.
///
/// Returns `None` for anything that is not a real calendar date, so the
/// caller can drop the rule instead of failing.
pub fn parse_ui_date(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), UI_FORMAT)
        .ok()
        .map(|d| d.format(ISO_FORMAT).to_string())
}

/// Formats the leading `YYYY-MM-DD` of a range bound as `DD/MM/YYYY`.
///
/// The time part, if any, may follow a `T` or a space.
pub fn format_ui_date(timestamp: &str) -> Option<String> {
    let (date, rest) = NaiveDate::parse_and_remainder(timestamp.trim(), ISO_FORMAT).ok()?;
    if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
        Some(to_ui_date(date))
    } else {
        None
    }
}

pub fn to_ui_date(date: NaiveDate) -> String {
    date.format(UI_FORMAT).to_string()
}
