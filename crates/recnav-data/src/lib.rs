//! Record sources for paged browsing of the baby-names data set

pub mod bootstrap;
pub mod browser;
pub mod records;
pub mod sources;

use std::convert::Infallible;

use arrow::error::ArrowError;
use recnav_core::{ComputeError, NavigatorError};
use thiserror::Error;

// Re-exports
pub use bootstrap::{build_database, ensure_database, read_names};
pub use browser::RecordBrowser;
pub use records::{Gender, NameFilter, NameRecord};
pub use sources::{FrameSource, Page, RecordSource, SqliteSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Navigator error: {0}")]
    Navigator(#[from] NavigatorError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}

impl From<ComputeError<Infallible>> for DataError {
    fn from(error: ComputeError<Infallible>) -> Self {
        match error {
            ComputeError::Navigator(e) => DataError::Navigator(e),
            ComputeError::Count(never) => match never {},
        }
    }
}

impl From<ComputeError<DataError>> for DataError {
    fn from(error: ComputeError<DataError>) -> Self {
        match error {
            ComputeError::Navigator(e) => DataError::Navigator(e),
            ComputeError::Count(e) => e,
        }
    }
}
