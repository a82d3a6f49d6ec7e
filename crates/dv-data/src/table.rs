//! In-memory title tables

use std::path::Path;

use dv_core::{columns, RawTitle, TitleRecord};
use tracing::debug;

use crate::schema::NullCounts;
use crate::DataError;

/// Rows as loaded from the input file
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Header names in file order, including columns the model ignores
    pub headers: Vec<String>,
    pub rows: Vec<RawTitle>,
    /// Missing-value counts per header, taken before any cleaning
    pub null_counts: NullCounts,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// The cleaned table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleTable {
    pub records: Vec<TitleRecord>,
}

impl TitleTable {
    pub fn new(records: Vec<TitleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TitleRecord> {
        self.records.iter()
    }

    /// Write the table as CSV, replacing any existing file at `path`
    pub fn write_csv(&self, path: &Path) -> Result<(), DataError> {
        let mut writer = csv::Writer::from_path(path)?;
        if self.records.is_empty() {
            // serde writes the header with the first row only
            writer.write_record(columns::CLEANED)?;
        }
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!(rows = self.records.len(), path = %path.display(), "wrote cleaned table");
        Ok(())
    }

    /// Read a table previously written by [`TitleTable::write_csv`]
    #[cfg(test)]
    pub fn read_csv(path: &Path) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        let records = reader
            .deserialize()
            .collect::<Result<Vec<TitleRecord>, csv::Error>>()?;
        Ok(Self { records })
    }
}
