//! Generic table manager
//!
//! `TableManager` owns one database connection for its lifetime and builds
//! every statement it executes from caller-supplied name→value mappings, so
//! the same manager serves any table shape. All operations are synchronous
//! and blocking; each mutating call commits as its own atomic unit
//! (autocommit mode), and no operation is retried automatically.
//!
//! Lifecycle: a manager is constructed `Open` and moves to `Closed` on
//! [`TableManager::close`] (or drop). Every data operation on a closed
//! manager fails with [`StorageError::ConnectionClosed`]; reopening
//! requires a new instance.

use crate::storage::connection::StoreConn;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::record::{Record, Value};
use crate::storage::statement::{
    build_create_table, build_delete, build_drop_table, build_insert, build_select, TableSchema,
};
use tracing::debug;

/// Owns one connection and exposes typed create/read/delete operations
pub struct TableManager {
    conn: Option<StoreConn>,
}

impl TableManager {
    /// Open a manager bound to a database file, creating the file if absent
    pub fn open(path: &str) -> StorageResult<Self> {
        debug!("opening database at {}", path);
        Ok(TableManager {
            conn: Some(StoreConn::open_path(path)?),
        })
    }

    /// Open a manager over an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(TableManager {
            conn: Some(StoreConn::open_in_memory()?),
        })
    }

    fn conn(&self) -> StorageResult<&StoreConn> {
        self.conn.as_ref().ok_or(StorageError::ConnectionClosed)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection
    ///
    /// The connection is released exactly once; closing an already-closed
    /// manager is a no-op.
    pub fn close(&mut self) -> StorageResult<()> {
        if let Some(db) = self.conn.take() {
            debug!("closing database connection");
            db.conn.close().map_err(|(_, e)| StorageError::from(e))?;
        }
        Ok(())
    }

    /// Create a table from a column→type-clause mapping
    ///
    /// Idempotent: safe to call when the table already exists.
    pub fn create_table(&self, table: &str, schema: &TableSchema) -> StorageResult<()> {
        let sql = build_create_table(table, schema)?;
        debug!("creating table {}", table);
        self.conn()?.execute(&sql)?;
        Ok(())
    }

    /// Drop a table; no-op if it does not exist
    pub fn drop_table(&self, table: &str) -> StorageResult<()> {
        let sql = build_drop_table(table)?;
        debug!("dropping table {}", table);
        self.conn()?.execute(&sql)?;
        Ok(())
    }

    /// Insert a record and return the new row's identifier
    ///
    /// The identifier is the autoincrement primary key when the table
    /// declares one, and the engine's rowid otherwise.
    pub fn add(&self, table: &str, record: &Record) -> StorageResult<i64> {
        let (sql, params) = build_insert(table, record)?;
        let db = self.conn()?;
        db.execute_with_params(&sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(db.conn.last_insert_rowid())
    }

    /// Select rows, optionally filtered by exact-match criteria and ordered
    ///
    /// Each row comes back as a [`Record`] with the statement's column order
    /// preserved. Rows are read forward-only from the underlying cursor and
    /// collected; re-issue the query to read them again.
    pub fn select(
        &self,
        table: &str,
        criteria: Option<&Record>,
        order_by: Option<&str>,
    ) -> StorageResult<Vec<Record>> {
        let (sql, params) = build_select(table, criteria, order_by)?;
        let db = self.conn()?;

        let mut stmt = db.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (idx, name) in columns.iter().enumerate() {
                record.set(name.clone(), row.get::<_, Value>(idx)?);
            }
            out.push(record);
        }
        Ok(out)
    }

    /// Delete rows matching the criteria and return the affected count
    ///
    /// Zero is a valid count ("nothing matched"). Empty criteria fails fast
    /// with [`StorageError::InvalidCriteria`] rather than wiping the table.
    pub fn delete(&self, table: &str, criteria: &Record) -> StorageResult<usize> {
        let (sql, params) = build_delete(table, criteria)?;
        let db = self.conn()?;
        let affected = db.execute_with_params(&sql, rusqlite::params_from_iter(params.iter()))?;
        debug!("deleted {} row(s) from {}", affected, table);
        Ok(affected)
    }

    /// Check table existence via the engine's catalog
    pub fn table_exists(&self, table: &str) -> StorageResult<bool> {
        self.conn()?.table_exists(table)
    }

    /// Row count for a table
    pub fn count(&self, table: &str) -> StorageResult<u64> {
        self.conn()?.table_count(table)
    }
}
