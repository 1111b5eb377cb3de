//! Dynamic SQL statement synthesis
//!
//! Every statement the table manager executes is built here from a table
//! name plus a name→value mapping, so the same code path serves any table
//! shape. Builders emit parameterized statement text together with the
//! ordered list of bound values; values never appear in the text itself.
//!
//! Identifier safety: table and column names originate only from trusted,
//! caller-supplied configuration (never from end-user free text), since
//! they are interpolated directly into the SQL. They are additionally
//! checked against an alphanumeric/underscore pattern before interpolation.
//! The `order_by` clause is appended verbatim and is part of the same
//! trusted-input boundary.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::record::{Record, Value};

/// Ordered column→type-clause mapping supplied at table-creation time
///
/// The manager does not hardcode any table shape; callers describe the
/// schema and the builder joins the entries in mapping order.
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<(String, String)>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column with its SQL type/constraint clause
    pub fn column(mut self, name: impl Into<String>, clause: impl Into<String>) -> Self {
        self.columns.push((name.into(), clause.into()));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Check a name against the `[A-Za-z_][A-Za-z0-9_]*` identifier pattern
pub(crate) fn valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn checked_table(name: &str) -> StorageResult<&str> {
    if valid_identifier(name) {
        Ok(name)
    } else {
        Err(StorageError::UnknownTable(name.to_string()))
    }
}

fn checked_column(name: &str) -> StorageResult<&str> {
    if valid_identifier(name) {
        Ok(name)
    } else {
        Err(StorageError::UnknownColumn(name.to_string()))
    }
}

/// Build `WHERE` text and its bound values from an exact-match criteria mapping
fn where_clause(criteria: &Record) -> StorageResult<(String, Vec<Value>)> {
    let mut parts = Vec::with_capacity(criteria.len());
    let mut params = Vec::with_capacity(criteria.len());

    for (i, (name, value)) in criteria.iter().enumerate() {
        let column = checked_column(name)?;
        parts.push(format!("{} = ?{}", column, i + 1));
        params.push(value.clone());
    }

    Ok((parts.join(" AND "), params))
}

/// Build `CREATE TABLE IF NOT EXISTS t (col clause, ...)`
pub fn build_create_table(table: &str, schema: &TableSchema) -> StorageResult<String> {
    let table = checked_table(table)?;
    if schema.is_empty() {
        return Err(StorageError::MalformedSchema(format!(
            "no columns declared for table '{}'",
            table
        )));
    }

    let mut columns = Vec::with_capacity(schema.len());
    for (name, clause) in schema.iter() {
        columns.push(format!("{} {}", checked_column(name)?, clause));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table,
        columns.join(", ")
    ))
}

/// Build `DROP TABLE IF EXISTS t`
pub fn build_drop_table(table: &str) -> StorageResult<String> {
    Ok(format!("DROP TABLE IF EXISTS {}", checked_table(table)?))
}

/// Build `INSERT INTO t (a, b) VALUES (?1, ?2)` plus the bound values
///
/// Fields are taken in the record's insertion order, so statement text and
/// parameter list always line up.
pub fn build_insert(table: &str, record: &Record) -> StorageResult<(String, Vec<Value>)> {
    let table = checked_table(table)?;
    if record.is_empty() {
        return Err(StorageError::InvalidCriteria(
            "record has no fields to insert".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(record.len());
    let mut placeholders = Vec::with_capacity(record.len());
    let mut params = Vec::with_capacity(record.len());

    for (i, (name, value)) in record.iter().enumerate() {
        columns.push(checked_column(name)?.to_string());
        placeholders.push(format!("?{}", i + 1));
        params.push(value.clone());
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok((sql, params))
}

/// Build `SELECT * FROM t` with optional criteria and ordering
///
/// Empty or absent criteria selects all rows.
pub fn build_select(
    table: &str,
    criteria: Option<&Record>,
    order_by: Option<&str>,
) -> StorageResult<(String, Vec<Value>)> {
    let mut sql = format!("SELECT * FROM {}", checked_table(table)?);
    let mut params = Vec::new();

    if let Some(criteria) = criteria {
        if !criteria.is_empty() {
            let (clause, bound) = where_clause(criteria)?;
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
            params = bound;
        }
    }

    if let Some(order) = order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(order);
    }

    Ok((sql, params))
}

/// Build `DELETE FROM t WHERE ...` plus the bound values
///
/// Criteria must be non-empty; deleting without a filter would silently
/// wipe the table, so it fails fast instead.
pub fn build_delete(table: &str, criteria: &Record) -> StorageResult<(String, Vec<Value>)> {
    let table = checked_table(table)?;
    if criteria.is_empty() {
        return Err(StorageError::InvalidCriteria(
            "delete requires at least one criteria field".to_string(),
        ));
    }

    let (clause, params) = where_clause(criteria)?;
    Ok((format!("DELETE FROM {} WHERE {}", table, clause), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifier() {
        assert!(valid_identifier("bookmarks"));
        assert!(valid_identifier("_meta"));
        assert!(valid_identifier("table_2"));
        assert!(!valid_identifier(""));
        assert!(!valid_identifier("2fast"));
        assert!(!valid_identifier("name; drop table x"));
        assert!(!valid_identifier("a-b"));
    }

    #[test]
    fn test_build_create_table() {
        let schema = TableSchema::new()
            .column("id", "integer primary key autoincrement")
            .column("title", "text not null");

        let sql = build_create_table("bookmarks", &schema).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS bookmarks \
             (id integer primary key autoincrement, title text not null)"
        );
    }

    #[test]
    fn test_create_table_empty_schema() {
        let err = build_create_table("bookmarks", &TableSchema::new()).unwrap_err();
        assert!(matches!(err, StorageError::MalformedSchema(_)));
    }

    #[test]
    fn test_create_table_bad_table_name() {
        let schema = TableSchema::new().column("id", "integer");
        let err = build_create_table("bad name", &schema).unwrap_err();
        assert!(matches!(err, StorageError::UnknownTable(_)));
    }

    #[test]
    fn test_build_insert() {
        let record = Record::new()
            .with("title", "t1")
            .with("url", "http://a")
            .with("visits", 2i64);

        let (sql, params) = build_insert("bookmarks", &record).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO bookmarks (title, url, visits) VALUES (?1, ?2, ?3)"
        );
        assert_eq!(
            params,
            vec![
                Value::Text("t1".to_string()),
                Value::Text("http://a".to_string()),
                Value::Integer(2),
            ]
        );
    }

    #[test]
    fn test_insert_rejects_empty_record() {
        let err = build_insert("bookmarks", &Record::new()).unwrap_err();
        assert!(matches!(err, StorageError::InvalidCriteria(_)));
    }

    #[test]
    fn test_insert_rejects_bad_column() {
        let record = Record::new().with("ti tle", "x");
        let err = build_insert("bookmarks", &record).unwrap_err();
        assert!(matches!(err, StorageError::UnknownColumn(_)));
    }

    #[test]
    fn test_build_select_no_criteria() {
        let (sql, params) = build_select("bookmarks", None, None).unwrap();
        assert_eq!(sql, "SELECT * FROM bookmarks");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_select_empty_criteria_means_all_rows() {
        let empty = Record::new();
        let (sql, params) = build_select("bookmarks", Some(&empty), None).unwrap();
        assert_eq!(sql, "SELECT * FROM bookmarks");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_select_with_criteria_and_order() {
        let criteria = Record::new().with("notes", "n").with("url", "http://a");
        let (sql, params) =
            build_select("bookmarks", Some(&criteria), Some("id desc")).unwrap();

        assert_eq!(
            sql,
            "SELECT * FROM bookmarks WHERE notes = ?1 AND url = ?2 ORDER BY id desc"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_build_delete() {
        let criteria = Record::new().with("id", 7i64);
        let (sql, params) = build_delete("bookmarks", &criteria).unwrap();

        assert_eq!(sql, "DELETE FROM bookmarks WHERE id = ?1");
        assert_eq!(params, vec![Value::Integer(7)]);
    }

    #[test]
    fn test_delete_rejects_empty_criteria() {
        let err = build_delete("bookmarks", &Record::new()).unwrap_err();
        assert!(matches!(err, StorageError::InvalidCriteria(_)));
    }
}
