#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Shelfmark - a personal bookmark manager
//!
//! Shelfmark persists named URLs with notes and timestamps in a local
//! SQLite database. It can be used as both a command-line application and
//! a library.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - **[`storage`]**: the data-access layer (always available)
//!   - a schema-agnostic [`TableManager`] that synthesizes every SQL
//!     statement from caller-supplied name→value mappings
//!   - [`Record`]/[`Value`]: ordered named-field row representation
//!   - [`StorageError`]: the typed failure taxonomy
//!
//! - **[`bookmarks`]**: the bookmark table schema, [`Bookmark`], and the
//!   [`BookmarkStore`] entry point
//!
//! - **[`config`]**: configuration management for the CLI
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shelfmark::{Bookmark, BookmarkStore};
//!
//! // Open or create the database and its table
//! let store = BookmarkStore::open("bookmarks.sqlite3")?;
//!
//! let id = store.add(&Bookmark::new(
//!     "The Rust Book",
//!     "https://doc.rust-lang.org/book/",
//!     Some("reading list".to_string()),
//! ))?;
//!
//! for bookmark in store.list_all(Some("id desc"))? {
//!     println!("#{:?} {} <{}>", bookmark.id, bookmark.title, bookmark.url);
//! }
//!
//! store.delete_by_id(id)?;
//! ```
//!
//! The generic layer is available directly when a different table shape is
//! needed; see the [`storage`] module docs.

pub mod bookmarks;
pub mod config;
pub mod storage;

// =============================================================================
// Configuration (always available)
// =============================================================================

pub use config::ShelfmarkConfig;

// =============================================================================
// Storage layer - re-export commonly used types
// =============================================================================

pub use storage::{
    Record, StorageError, StorageResult, StoreConn, TableManager, TableSchema, Value,
};

// =============================================================================
// Bookmark domain
// =============================================================================

pub use bookmarks::{bookmarks_schema, Bookmark, BookmarkStore, BOOKMARKS_TABLE};
