//! Column layout of the cleaned table and missing-value bookkeeping

use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Date32Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use dv_core::columns;

use crate::table::TitleTable;
use crate::DataError;

/// Days from 0001-01-01 (CE) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Missing-value count per column, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullCounts {
    counts: Vec<(String, usize)>,
}

impl NullCounts {
    pub fn new(headers: &[String]) -> Self {
        Self {
            counts: headers.iter().map(|name| (name.clone(), 0)).collect(),
        }
    }

    /// Record a missing cell in column `idx`. Out-of-range indices are ignored.
    pub fn record_missing(&mut self, idx: usize) {
        if let Some((_, count)) = self.counts.get_mut(idx) {
            *count += 1;
        }
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for NullCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.counts.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, count) in &self.counts {
            writeln!(f, "{name:<width$}    {count}")?;
        }
        write!(f, "dtype: int64")
    }
}

/// Arrow schema of the cleaned table
pub fn title_schema() -> Schema {
    Schema::new(vec![
        Field::new(columns::SHOW_ID, DataType::Utf8, true),
        Field::new(columns::TYPE, DataType::Utf8, true),
        Field::new(columns::TITLE, DataType::Utf8, true),
        Field::new(columns::DIRECTOR, DataType::Utf8, false),
        Field::new(columns::CAST, DataType::Utf8, false),
        Field::new(columns::COUNTRY, DataType::Utf8, false),
        Field::new(columns::DATE_ADDED, DataType::Date32, true),
        Field::new(columns::RELEASE_YEAR, DataType::Int64, true),
        Field::new(columns::RATING, DataType::Utf8, false),
        Field::new(columns::DURATION, DataType::Utf8, true),
        Field::new(columns::LISTED_IN, DataType::Utf8, true),
        Field::new(columns::DATE_ADDED_VALID, DataType::Boolean, false),
        Field::new(columns::DURATION_VALUE, DataType::Int64, true),
        Field::new(columns::DURATION_TYPE, DataType::Utf8, false),
    ])
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn string_column<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
    let mut builder = StringBuilder::new();
    for value in values {
        builder.append_option(value);
    }
    Arc::new(builder.finish())
}

fn int_column(values: impl Iterator<Item = Option<i64>>) -> ArrayRef {
    let mut builder = Int64Builder::new();
    for value in values {
        builder.append_option(value);
    }
    Arc::new(builder.finish())
}

impl TitleTable {
    /// Columnar view of the table, laid out as [`title_schema`]
    pub fn to_record_batch(&self) -> Result<RecordBatch, DataError> {
        let records = &self.records;

        let mut date_added = Date32Builder::new();
        let mut date_added_valid = BooleanBuilder::new();
        for record in records {
            date_added.append_option(record.date_added.map(days_since_epoch));
            date_added_valid.append_value(record.date_added_valid);
        }

        let columns: Vec<ArrayRef> = vec![
            string_column(records.iter().map(|r| r.show_id.as_deref())),
            string_column(records.iter().map(|r| r.kind.as_deref())),
            string_column(records.iter().map(|r| r.title.as_deref())),
            string_column(records.iter().map(|r| Some(r.director.as_str()))),
            string_column(records.iter().map(|r| Some(r.cast.as_str()))),
            string_column(records.iter().map(|r| Some(r.country.as_str()))),
            Arc::new(date_added.finish()),
            int_column(records.iter().map(|r| r.release_year.map(i64::from))),
            string_column(records.iter().map(|r| Some(r.rating.as_str()))),
            string_column(records.iter().map(|r| r.duration.as_deref())),
            string_column(records.iter().map(|r| r.listed_in.as_deref())),
            Arc::new(date_added_valid.finish()),
            int_column(records.iter().map(|r| r.duration_value.map(i64::from))),
            string_column(records.iter().map(|r| Some(r.duration_type.label()))),
        ];

        RecordBatch::try_new(Arc::new(title_schema()), columns).map_err(|e| e.into())
    }
}
