//! Database connection management
//!
//! Thin wrapper around a single SQLite connection, handling both file-based
//! and in-memory databases with consistent configuration. The connection
//! runs in SQLite's autocommit mode: every statement executed through the
//! storage layer commits as its own atomic unit.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::statement;
use rusqlite::Connection;

/// Core database connection wrapper
///
/// Opening a file path creates the database file if it does not exist.
/// The connection is a single-writer, single-reader local resource and is
/// not designed for concurrent use.
pub struct StoreConn {
    pub(crate) conn: Connection,
}

impl StoreConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created.
    pub fn open(path: Option<&str>) -> StorageResult<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)?,
            None => Connection::open_in_memory()?,
        };

        let db = StoreConn { conn };
        db.configure()?;
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> StorageResult<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open(None)
    }

    fn configure(&self) -> StorageResult<()> {
        // WAL keeps readers unblocked during the occasional write
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        self.conn.execute("PRAGMA synchronous=NORMAL", [])?;
        self.conn.execute("PRAGMA foreign_keys=ON", [])?;

        Ok(())
    }

    /// Execute a SQL statement without parameters
    pub fn execute(&self, sql: &str) -> StorageResult<usize> {
        Ok(self.conn.execute(sql, [])?)
    }

    /// Execute a SQL statement with parameters
    pub fn execute_with_params<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> StorageResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Check if a table exists via the engine's catalog
    pub fn table_exists(&self, table_name: &str) -> StorageResult<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Get the row count for a table
    pub fn table_count(&self, table_name: &str) -> StorageResult<u64> {
        if !statement::valid_identifier(table_name) {
            return Err(StorageError::UnknownTable(table_name.to_string()));
        }
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let count: u64 = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = StoreConn::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_execute() {
        let db = StoreConn::open_in_memory().unwrap();
        let result = db.execute("CREATE TABLE test (id INTEGER PRIMARY KEY)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_table_exists() {
        let db = StoreConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE test_table (id INTEGER PRIMARY KEY)")
            .unwrap();

        assert!(db.table_exists("test_table").unwrap());
        assert!(!db.table_exists("nonexistent_table").unwrap());
    }

    #[test]
    fn test_table_count() {
        let db = StoreConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE test_table (id INTEGER PRIMARY KEY)")
            .unwrap();
        db.execute("INSERT INTO test_table (id) VALUES (1), (2), (3)")
            .unwrap();

        assert_eq!(db.table_count("test_table").unwrap(), 3);
    }

    #[test]
    fn test_table_count_rejects_bad_identifier() {
        let db = StoreConn::open_in_memory().unwrap();
        let err = db.table_count("x; drop table y").unwrap_err();
        assert!(matches!(err, StorageError::UnknownTable(_)));
    }
}
