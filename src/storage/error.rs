//! Storage error taxonomy
//!
//! Every failure coming out of the storage layer is one of the kinds below,
//! so callers can branch on the taxonomy instead of inspecting raw SQLite
//! errors. Engine-level failures that fall outside the taxonomy (e.g. lock
//! contention) are carried in [`StorageError::Sqlite`]; the storage layer
//! never retries on the caller's behalf.

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Umbrella error kind for all data-access failures
#[derive(Error, Debug)]
pub enum StorageError {
    /// A data operation was attempted after the connection was released
    #[error("connection closed")]
    ConnectionClosed,

    /// A constraint (NOT NULL, UNIQUE, CHECK) rejected the statement
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The named table does not exist, or the table name was rejected
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// The named column does not exist, or the column name was rejected
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The criteria mapping is unusable for the requested operation
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    /// The columns mapping is unusable for table creation
    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    /// An engine failure outside the taxonomy above
    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),
}

/// Classify an engine error into the taxonomy where its shape is recognized
fn classify(err: &rusqlite::Error) -> Option<StorageError> {
    let rusqlite::Error::SqliteFailure(code, msg) = err else {
        return None;
    };

    if code.code == rusqlite::ErrorCode::ConstraintViolation {
        let detail = msg.clone().unwrap_or_else(|| code.to_string());
        return Some(StorageError::ConstraintViolation(detail));
    }

    // SQLite reports missing tables and columns only through the message
    // text of a generic error code.
    let msg = msg.as_deref()?;
    if let Some(name) = msg.strip_prefix("no such table: ") {
        return Some(StorageError::UnknownTable(name.to_string()));
    }
    if let Some(name) = msg.strip_prefix("no such column: ") {
        return Some(StorageError::UnknownColumn(name.to_string()));
    }
    if let Some(pos) = msg.find(" has no column named ") {
        let name = &msg[pos + " has no column named ".len()..];
        return Some(StorageError::UnknownColumn(name.to_string()));
    }

    None
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match classify(&err) {
            Some(mapped) => mapped,
            None => StorageError::Sqlite(err),
        }
    }
}
