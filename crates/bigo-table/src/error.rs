use thiserror::Error;

/// Errors that can occur during analysis storage operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// An error originating from the underlying SQLite database.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An existing table does not have the expected layout.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// A stricter store refused the record before it reached storage.
    #[error("Record rejected: {0}")]
    Rejected(String),
}
