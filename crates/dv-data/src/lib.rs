//! Data handling for the Netflix titles analysis

pub mod clean;
pub mod config;
pub mod sample;
pub mod schema;
pub mod sources;
pub mod table;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use clean::{clean, CleanReport};
pub use config::NullConfig;
pub use sample::SampleSpec;
pub use schema::NullCounts;
pub use sources::{DatasetOrigin, ObtainedDataset, TitleSource};
pub use table::{RawTable, TitleTable};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Arrow error: {0}")]
    Arrow(ArrowError),
    
    #[error("CSV parsing error: {0}")]
    Csv(String),
    
    #[error("Sample generation error: {0}")]
    Generation(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
