//! Storage module
//!
//! This module provides the data-access layer for shelfmark, organized into:
//!
//! - **connection**: SQLite connection wrapper
//! - **record**: schema-free row representation ([`Record`], [`Value`])
//! - **statement**: dynamic SQL synthesis from name→value mappings
//! - **manager**: the connection-owning [`TableManager`]
//! - **error**: the [`StorageError`] taxonomy
//!
//! # Architecture
//!
//! ```text
//! storage/
//! ├── connection  # StoreConn: open/configure one SQLite handle
//! ├── record      # Record/Value: ordered named-field mappings
//! ├── statement   # build_* functions: text + ordered bound values
//! ├── manager     # TableManager: create/drop/add/select/delete
//! └── error       # StorageError: typed failure taxonomy
//! ```
//!
//! The manager is deliberately schema-agnostic: statements are synthesized
//! from the mappings callers pass in, so one manager serves any table
//! shape. The bookmark-specific schema lives in [`crate::bookmarks`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use shelfmark::storage::{Record, TableManager, TableSchema};
//!
//! let manager = TableManager::open("bookmarks.sqlite3")?;
//! manager.create_table(
//!     "bookmarks",
//!     &TableSchema::new()
//!         .column("id", "integer primary key autoincrement")
//!         .column("title", "text not null"),
//! )?;
//!
//! let id = manager.add("bookmarks", &Record::new().with("title", "rust"))?;
//! let rows = manager.select("bookmarks", None, Some("id desc"))?;
//! ```

pub mod connection;
pub mod error;
pub mod manager;
pub mod record;
pub mod statement;

pub use connection::StoreConn;
pub use error::{StorageError, StorageResult};
pub use manager::TableManager;
pub use record::{Record, Value};
pub use statement::{
    build_create_table, build_delete, build_drop_table, build_insert, build_select, TableSchema,
};
