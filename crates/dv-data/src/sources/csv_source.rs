use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use dv_core::RawTitle;
use tracing::{debug, info};

use crate::config::NullConfig;
use crate::sample::{write_sample, SampleSpec};
use crate::schema::NullCounts;
use crate::table::RawTable;
use crate::DataError;

/// Where an obtained dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// The input file already existed
    Loaded,
    /// The input file was missing and a sample of `rows` rows was written first
    Generated { rows: usize },
}

/// Result of [`TitleSource::obtain`]
#[derive(Debug, Clone)]
pub struct ObtainedDataset {
    pub table: RawTable,
    pub origin: DatasetOrigin,
}

/// CSV source for the titles dataset
pub struct TitleSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Markers treated as missing values
    null_config: NullConfig,
}

impl TitleSource {
    /// Create a new source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            null_config: NullConfig::default(),
        }
    }

    pub fn with_null_config(mut self, null_config: NullConfig) -> Self {
        self.null_config = null_config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, generating a sample file first when none exists
    pub fn obtain(&self, sample: &SampleSpec) -> Result<ObtainedDataset, DataError> {
        let origin = if self.path.exists() {
            DatasetOrigin::Loaded
        } else {
            info!(path = %self.path.display(), "input file missing, generating sample dataset");
            let rows = write_sample(&self.path, sample)?;
            DatasetOrigin::Generated { rows }
        };

        let table = self.load()?;
        Ok(ObtainedDataset { table, origin })
    }

    /// Read the whole file.
    ///
    /// Short rows are padded with missing cells; a row with more fields than
    /// the header is an error.
    pub fn load(&self) -> Result<RawTable, DataError> {
        let file = File::open(&self.path)?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers: StringRecord = csv_reader.headers()?.clone();
        let header_names: Vec<String> = headers.iter().map(str::to_string).collect();
        let mut null_counts = NullCounts::new(&header_names);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let mut record = result?;
            if record.len() > headers.len() {
                let line = record.position().map_or(0, |pos| pos.line());
                return Err(DataError::Csv(format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                )));
            }

            for (idx, value) in record.iter().enumerate() {
                if self.null_config.is_null(value) {
                    null_counts.record_missing(idx);
                }
            }
            for idx in record.len()..headers.len() {
                null_counts.record_missing(idx);
                record.push_field("");
            }

            let mut row: RawTitle = record.deserialize(Some(&headers))?;
            row.normalize_missing(|value| self.null_config.is_null(value));
            rows.push(row);
        }

        debug!(
            rows = rows.len(),
            columns = header_names.len(),
            missing = null_counts.total(),
            "loaded {}",
            self.source_name()
        );

        Ok(RawTable {
            headers: header_names,
            rows,
            null_counts,
        })
    }

    pub fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
