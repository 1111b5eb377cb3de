//! Bookmark storage
//!
//! This module binds the generic table manager to the one table shelfmark
//! ships by convention: `bookmarks`. The schema is declared here and handed
//! to the manager at startup; nothing in the storage layer knows about
//! bookmarks.

use crate::storage::{Record, StorageError, StorageResult, TableManager, TableSchema, Value};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

/// Table name used by convention for the bookmark store
pub const BOOKMARKS_TABLE: &str = "bookmarks";

/// Column→type-clause mapping for the bookmarks table
pub fn bookmarks_schema() -> TableSchema {
    TableSchema::new()
        .column("id", "integer primary key autoincrement")
        .column("title", "text not null")
        .column("url", "text not null")
        .column("notes", "text")
        .column("date_added", "text not null")
}

/// One saved bookmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    /// Assigned by the database on insert; `None` before then
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
    pub notes: Option<String>,
    /// ISO-8601 timestamp string
    pub date_added: String,
}

impl Bookmark {
    /// Create a bookmark stamped with the current UTC time
    pub fn new(title: impl Into<String>, url: impl Into<String>, notes: Option<String>) -> Self {
        Bookmark {
            id: None,
            title: title.into(),
            url: url.into(),
            notes,
            date_added: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Convert to the named-field mapping the table manager consumes
    ///
    /// The `id` column is omitted so the database can assign it.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("title", self.title.clone())
            .with("url", self.url.clone())
            .with("notes", self.notes.clone())
            .with("date_added", self.date_added.clone())
    }

    /// Rebuild a bookmark from a selected row
    pub fn from_record(record: &Record) -> StorageResult<Self> {
        let id = record.get("id").and_then(Value::as_integer);
        let notes = match record.get("notes") {
            Some(Value::Text(s)) => Some(s.clone()),
            _ => None,
        };

        Ok(Bookmark {
            id,
            title: required_text(record, "title")?,
            url: required_text(record, "url")?,
            notes,
            date_added: required_text(record, "date_added")?,
        })
    }
}

fn required_text(record: &Record, name: &str) -> StorageResult<String> {
    match record.require(name)? {
        Value::Text(s) => Ok(s.clone()),
        other => Err(StorageError::ConstraintViolation(format!(
            "column '{}' holds {:?}, expected text",
            name, other
        ))),
    }
}

/// Main entry point for persistent bookmark data
///
/// `BookmarkStore` owns a [`TableManager`] bound to a single database file
/// and ensures the bookmarks table exists before use.
pub struct BookmarkStore {
    manager: TableManager,
}

impl BookmarkStore {
    /// Open the store at the specified path
    ///
    /// Creates the database file and the bookmarks table if absent.
    pub fn open(path: &str) -> StorageResult<Self> {
        let manager = TableManager::open(path)?;
        manager.create_table(BOOKMARKS_TABLE, &bookmarks_schema())?;
        info!("bookmark store ready at {}", path);
        Ok(BookmarkStore { manager })
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> StorageResult<Self> {
        let manager = TableManager::open_in_memory()?;
        manager.create_table(BOOKMARKS_TABLE, &bookmarks_schema())?;
        Ok(BookmarkStore { manager })
    }

    /// Insert a bookmark and return its assigned id
    pub fn add(&self, bookmark: &Bookmark) -> StorageResult<i64> {
        let id = self.manager.add(BOOKMARKS_TABLE, &bookmark.to_record())?;
        info!("added bookmark #{}: {}", id, bookmark.title);
        Ok(id)
    }

    /// List bookmarks matching the criteria, in the given order
    pub fn list(
        &self,
        criteria: Option<&Record>,
        order_by: Option<&str>,
    ) -> StorageResult<Vec<Bookmark>> {
        let rows = self.manager.select(BOOKMARKS_TABLE, criteria, order_by)?;
        rows.iter().map(Bookmark::from_record).collect()
    }

    /// List every bookmark
    pub fn list_all(&self, order_by: Option<&str>) -> StorageResult<Vec<Bookmark>> {
        self.list(None, order_by)
    }

    /// Find bookmarks by exact title
    pub fn find_by_title(&self, title: &str) -> StorageResult<Vec<Bookmark>> {
        let criteria = Record::new().with("title", title);
        self.list(Some(&criteria), None)
    }

    /// Delete by id; returns the number of rows removed (0 or 1)
    pub fn delete_by_id(&self, id: i64) -> StorageResult<usize> {
        let criteria = Record::new().with("id", id);
        self.manager.delete(BOOKMARKS_TABLE, &criteria)
    }

    /// Delete every bookmark with the given title
    pub fn delete_by_title(&self, title: &str) -> StorageResult<usize> {
        let criteria = Record::new().with("title", title);
        self.manager.delete(BOOKMARKS_TABLE, &criteria)
    }

    /// Number of stored bookmarks
    pub fn count(&self) -> StorageResult<u64> {
        self.manager.count(BOOKMARKS_TABLE)
    }

    /// Access the underlying manager, e.g. for ad-hoc criteria queries
    pub fn manager(&self) -> &TableManager {
        &self.manager
    }

    /// Release the connection; the store is unusable afterwards
    pub fn close(&mut self) -> StorageResult<()> {
        self.manager.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, date: &str) -> Bookmark {
        Bookmark {
            id: None,
            title: title.to_string(),
            url: "http://a".to_string(),
            notes: Some("n".to_string()),
            date_added: date.to_string(),
        }
    }

    #[test]
    fn test_open_creates_table() {
        let store = BookmarkStore::open_in_memory().unwrap();
        assert!(store.manager().table_exists(BOOKMARKS_TABLE).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_and_find() {
        let store = BookmarkStore::open_in_memory().unwrap();
        let id = store.add(&sample("t1", "2024-01-01T00:00:00")).unwrap();
        assert_eq!(id, 1);

        let found = store.find_by_title("t1").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(1));
        assert_eq!(found[0].url, "http://a");
        assert_eq!(found[0].notes.as_deref(), Some("n"));
        assert_eq!(found[0].date_added, "2024-01-01T00:00:00");
    }

    #[test]
    fn test_notes_filter_in_reverse_insertion_order() {
        let store = BookmarkStore::open_in_memory().unwrap();
        store.add(&sample("t1", "2024-01-01T00:00:00")).unwrap();
        store.add(&sample("t1-2", "2024-01-02T00:00:00")).unwrap();

        let criteria = Record::new().with("notes", "n");
        let rows = store.list(Some(&criteria), Some("id desc")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "t1-2");
        assert_eq!(rows[1].title, "t1");
    }

    #[test]
    fn test_delete_by_title_removes_row() {
        let store = BookmarkStore::open_in_memory().unwrap();
        store.add(&sample("t1", "2024-01-01T00:00:00")).unwrap();

        let affected = store.delete_by_title("t1").unwrap();
        assert_eq!(affected, 1);
        assert!(store.find_by_title("t1").unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_by_id_missing_row() {
        let store = BookmarkStore::open_in_memory().unwrap();
        assert_eq!(store.delete_by_id(42).unwrap(), 0);
    }

    #[test]
    fn test_bookmark_without_notes() {
        let store = BookmarkStore::open_in_memory().unwrap();
        let bookmark = Bookmark {
            id: None,
            title: "no notes".to_string(),
            url: "http://b".to_string(),
            notes: None,
            date_added: "2024-01-01T00:00:00".to_string(),
        };
        store.add(&bookmark).unwrap();

        let found = store.find_by_title("no notes").unwrap();
        assert_eq!(found[0].notes, None);
    }

    #[test]
    fn test_new_stamps_iso8601_date() {
        let bookmark = Bookmark::new("t", "http://a", None);
        // e.g. "2024-01-01T00:00:00Z"
        assert!(bookmark.date_added.contains('T'));
        assert!(bookmark.date_added.ends_with('Z'));
        assert_eq!(bookmark.id, None);
    }

    #[test]
    fn test_record_round_trip() {
        let bookmark = sample("t1", "2024-01-01T00:00:00");
        let record = bookmark.to_record();
        assert!(record.get("id").is_none());

        let rebuilt = Bookmark::from_record(&record).unwrap();
        assert_eq!(rebuilt, bookmark);
    }

    #[test]
    fn test_from_record_missing_title() {
        let record = Record::new().with("url", "http://a");
        let err = Bookmark::from_record(&record).unwrap_err();
        assert!(matches!(err, StorageError::UnknownColumn(name) if name == "title"));
    }

    #[test]
    fn test_file_backed_store_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfmark.sqlite3");
        let path = path.to_str().unwrap();

        let mut store = BookmarkStore::open(path).unwrap();
        store.add(&sample("persisted", "2024-01-01T00:00:00")).unwrap();
        store.close().unwrap();

        let store = BookmarkStore::open(path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find_by_title("persisted").unwrap().len(), 1);
    }
}
