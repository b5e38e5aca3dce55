//! Navigator error types

use thiserror::Error;

use crate::session::SessionId;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Invalid page size {0}: page size must be positive")]
    InvalidPageSize(usize),

    #[error("Unknown navigation action: {0}")]
    UnknownAction(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single window computation.
///
/// `Count` carries the record-count error exactly as the data source
/// produced it.
#[derive(Error, Debug)]
pub enum ComputeError<E> {
    #[error(transparent)]
    Navigator(#[from] NavigatorError),

    #[error("Record count failed: {0}")]
    Count(E),
}

impl<E> ComputeError<E> {
    /// Returns the record-count error, if that is what failed
    pub fn into_count_error(self) -> Option<E> {
        match self {
            ComputeError::Count(e) => Some(e),
            ComputeError::Navigator(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
