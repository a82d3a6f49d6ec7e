//! Duration text parsing ("90 min", "3 Seasons")

use serde::{Deserialize, Serialize};

/// Unit a duration string is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationKind {
    #[serde(rename = "min")]
    Minutes,
    Seasons,
    #[default]
    Unknown,
}

impl DurationKind {
    /// Label written to the `duration_type` column
    pub fn label(&self) -> &'static str {
        match self {
            DurationKind::Minutes => "min",
            DurationKind::Seasons => "Seasons",
            DurationKind::Unknown => "Unknown",
        }
    }

    /// Classify a duration string. "min" wins over "Season" when both appear.
    pub fn classify(text: &str) -> Self {
        if text.contains("min") {
            DurationKind::Minutes
        } else if text.contains("Season") {
            DurationKind::Seasons
        } else {
            DurationKind::Unknown
        }
    }
}

/// Result of parsing one `duration` cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDuration {
    pub value: Option<u32>,
    pub kind: DurationKind,
}

/// Extract the numeric part and the unit of a duration string.
///
/// The value is the first run of ASCII digits, and only when the text names a
/// known unit. Anything else yields `None` with [`DurationKind::Unknown`].
pub fn extract_duration(text: &str) -> ParsedDuration {
    let kind = DurationKind::classify(text);
    let value = match kind {
        DurationKind::Unknown => None,
        _ => leading_digit_run(text),
    };

    ParsedDuration { value, kind }
}

fn leading_digit_run(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes() {
        let parsed = extract_duration("90 min");
        assert_eq!(parsed.value, Some(90));
        assert_eq!(parsed.kind, DurationKind::Minutes);
        assert_eq!(parsed.kind.label(), "min");
    }

    #[test]
    fn test_seasons() {
        let parsed = extract_duration("3 Seasons");
        assert_eq!(parsed.value, Some(3));
        assert_eq!(parsed.kind.label(), "Seasons");

        let single = extract_duration("1 Season");
        assert_eq!(single.value, Some(1));
        assert_eq!(single.kind, DurationKind::Seasons);
    }

    #[test]
    fn test_unmatched_text() {
        for text in ["", "two hours", "120"] {
            let parsed = extract_duration(text);
            assert_eq!(parsed.value, None, "{text:?}");
            assert_eq!(parsed.kind, DurationKind::Unknown);
        }
    }

    #[test]
    fn test_unit_without_digits() {
        let parsed = extract_duration("a few Seasons");
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.kind, DurationKind::Seasons);
    }

    #[test]
    fn test_only_first_digit_run_is_used() {
        assert_eq!(extract_duration("1 h 30 min").value, Some(1));
    }
}
