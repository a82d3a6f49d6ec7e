//! Cleaning pass from raw rows to [`TitleRecord`]s

use dv_core::{extract_duration, parse_date_added, RawTitle, TitleRecord, UNKNOWN};
use tracing::debug;

use crate::table::{RawTable, TitleTable};

/// What the cleaning pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_before: usize,
    pub dropped_missing_rating: usize,
    /// Kept rows whose `date_added` was missing or unparseable
    pub invalid_dates: usize,
    /// Kept rows whose duration yielded no numeric value
    pub unknown_durations: usize,
}

impl CleanReport {
    pub fn rows_after(&self) -> usize {
        self.rows_before - self.dropped_missing_rating
    }
}

/// Clean one row. Returns `None` when the row has no rating.
pub fn clean_row(raw: RawTitle) -> Option<TitleRecord> {
    let rating = raw.rating?;

    let date_added = raw.date_added.as_deref().and_then(parse_date_added);
    let duration = extract_duration(raw.duration.as_deref().unwrap_or_default());
    let release_year = raw
        .release_year
        .as_deref()
        .and_then(|year| year.trim().parse::<i32>().ok());

    Some(TitleRecord {
        show_id: raw.show_id,
        kind: raw.kind,
        title: raw.title,
        director: raw.director.unwrap_or_else(|| UNKNOWN.to_string()),
        cast: raw.cast.unwrap_or_else(|| UNKNOWN.to_string()),
        country: raw.country.unwrap_or_else(|| UNKNOWN.to_string()),
        date_added,
        release_year,
        rating,
        duration: raw.duration,
        listed_in: raw.listed_in,
        date_added_valid: date_added.is_some(),
        duration_value: duration.value,
        duration_type: duration.kind,
    })
}

/// Default-fill free-text columns, parse dates and durations, and drop
/// rows without a rating
pub fn clean(raw: RawTable) -> (TitleTable, CleanReport) {
    let rows_before = raw.rows.len();
    let records: Vec<TitleRecord> = raw.rows.into_iter().filter_map(clean_row).collect();

    let report = CleanReport {
        rows_before,
        dropped_missing_rating: rows_before - records.len(),
        invalid_dates: records.iter().filter(|r| !r.date_added_valid).count(),
        unknown_durations: records.iter().filter(|r| r.duration_value.is_none()).count(),
    };
    debug!(?report, "cleaned titles");

    (TitleTable::new(records), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dv_core::DurationKind;

    fn raw(rating: Option<&str>) -> RawTitle {
        RawTitle {
            show_id: Some("s1".to_string()),
            kind: Some("Movie".to_string()),
            rating: rating.map(str::to_string),
            date_added: Some("March 3, 2020".to_string()),
            release_year: Some("2018".to_string()),
            duration: Some("95 min".to_string()),
            ..Default::default()
        }
    }

    fn table(rows: Vec<RawTitle>) -> RawTable {
        RawTable {
            rows,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_free_text_defaults_to_unknown() {
        let (cleaned, _) = clean(table(vec![raw(Some("PG")), raw(Some("R"))]));
        for record in cleaned.iter() {
            assert_eq!(record.director, "Unknown");
            assert_eq!(record.cast, "Unknown");
            assert_eq!(record.country, "Unknown");
        }
    }

    #[test]
    fn test_present_values_are_kept() {
        let mut row = raw(Some("PG"));
        row.director = Some("Jane Smith".to_string());
        let record = clean_row(row).unwrap();
        assert_eq!(record.director, "Jane Smith");
    }

    #[test]
    fn test_all_ratings_present_keeps_every_row() {
        let (cleaned, report) = clean(table(vec![raw(Some("PG")); 4]));
        assert_eq!(cleaned.len(), 4);
        assert_eq!(report.dropped_missing_rating, 0);
        assert_eq!(report.rows_after(), 4);
    }

    #[test]
    fn test_rows_without_rating_are_dropped() {
        let rows = vec![raw(Some("PG")), raw(None), raw(Some("R")), raw(None), raw(None)];
        let (cleaned, report) = clean(table(rows));
        assert_eq!(cleaned.len(), 2);
        assert_eq!(report.rows_before, 5);
        assert_eq!(report.dropped_missing_rating, 3);
        assert!(cleaned.iter().all(|r| !r.rating.is_empty()));
    }

    #[test]
    fn test_dates_and_durations() {
        let mut bad_date = raw(Some("TV-MA"));
        bad_date.date_added = Some("not a date".to_string());
        bad_date.duration = Some("2 Seasons".to_string());

        let mut no_duration = raw(Some("TV-MA"));
        no_duration.duration = None;

        let (cleaned, report) = clean(table(vec![raw(Some("PG")), bad_date, no_duration]));
        let records = &cleaned.records;

        assert_eq!(records[0].date_added, NaiveDate::from_ymd_opt(2020, 3, 3));
        assert!(records[0].date_added_valid);
        assert_eq!(records[0].duration_value, Some(95));
        assert_eq!(records[0].duration_type, DurationKind::Minutes);
        assert_eq!(records[0].release_year, Some(2018));

        assert_eq!(records[1].date_added, None);
        assert!(!records[1].date_added_valid);
        assert_eq!(records[1].duration_value, Some(2));
        assert_eq!(records[1].duration_type, DurationKind::Seasons);

        assert_eq!(records[2].duration_value, None);
        assert_eq!(records[2].duration_type, DurationKind::Unknown);

        assert_eq!(report.invalid_dates, 1);
        assert_eq!(report.unknown_durations, 1);
    }

    #[test]
    fn test_cleaned_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");

        let (cleaned, _) = clean(table(vec![raw(Some("PG")), raw(Some("R"))]));
        cleaned.write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, dv_core::columns::CLEANED.join(","));
        assert!(text.contains("2020-03-03"));

        assert_eq!(TitleTable::read_csv(&path).unwrap(), cleaned);
    }

    #[test]
    fn test_empty_table_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");

        let (cleaned, report) = clean(table(vec![raw(None)]));
        assert!(cleaned.is_empty());
        assert_eq!(report.dropped_missing_rating, 1);

        cleaned.write_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), dv_core::columns::CLEANED.join(","));
    }
}
