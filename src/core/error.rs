use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid field selection: {0} is not a known field index")]
    InvalidField(u32),
    #[error("Field {0} is an identifier and cannot be edited")]
    Immutable(u32),
    #[error("Database error - nothing was changed: {0}")]
    TransactionFailed(String),
    #[error("Delete aborted - nothing was removed: {0}")]
    PartialFailure(String),
    #[error("Input stream closed before a valid value was read")]
    InputClosed,
    #[error("Validation error: {0}")]
    Validation(String),
}
