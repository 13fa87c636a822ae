//! Storage error taxonomy shared by every repository implementation
//!
//! Both the PostgreSQL store and the in-memory mock report failures through
//! [`RepositoryError`], so workflows never see driver-specific errors.

use crate::error::Error;
use thiserror::Error;

/// Failure reported by the storage collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store could not be reached or did not answer in time
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (constraint, type, or permission violation)
    #[error("Rejected by store: {0}")]
    Rejected(String),

    #[error("Record not found")]
    NotFound,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db_err) => {
                RepositoryError::Rejected(db_err.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnNotFound(_) => RepositoryError::Rejected(err.to_string()),
            other => RepositoryError::Unavailable(other.to_string()),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::Rejected(reason) => Error::Rejected(reason),
            RepositoryError::Unavailable(reason) => Error::Unavailable(reason),
        }
    }
}
