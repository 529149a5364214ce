use std::backtrace::Backtrace;

use thiserror::Error;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// every failure surfaced by the synchronizer, the graph store, and the tag propagator.
///
/// The message is meant for logs and api responses, callers branch on the variant
#[derive(Error, Debug, PartialEq, Clone)]
pub enum WorkspaceError {
    /// the referenced path, node, tag, or row does not exist
    #[error("{0}")]
    NotFound(String),
    /// the destination is already occupied
    #[error("{0}")]
    Conflict(String),
    /// a filesystem operation failed
    #[error("{0}")]
    Io(String),
    /// a database operation failed
    #[error("{0}")]
    Store(String),
    /// the input was rejected before anything was touched
    #[error("{0}")]
    Validation(String),
}

impl WorkspaceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<rusqlite::Error> for WorkspaceError {
    fn from(value: rusqlite::Error) -> Self {
        log::error!(
            "Database operation failed! Error is {value:?}\n{}",
            Backtrace::force_capture()
        );
        Self::Store(format!("Database operation failed: {value}"))
    }
}

impl From<std::io::Error> for WorkspaceError {
    fn from(value: std::io::Error) -> Self {
        log::error!(
            "Filesystem operation failed! Error is {value:?}\n{}",
            Backtrace::force_capture()
        );
        Self::Io(format!("Filesystem operation failed: {value}"))
    }
}
