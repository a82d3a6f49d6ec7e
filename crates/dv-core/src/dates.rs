//! `date_added` parsing

use chrono::NaiveDate;

/// Formats tried in order. `%B` also accepts abbreviated month names.
const DATE_ADDED_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];

/// Parse a free-text `date_added` value such as `"January 5, 2019"`.
///
/// Returns `None` for blank or unrecognised input.
pub fn parse_date_added(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_ADDED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
