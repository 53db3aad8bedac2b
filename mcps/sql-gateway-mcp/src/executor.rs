//! Bounded executor - runs admitted queries on a write-disabled connection
//!
//! Every connection is opened with `SQLITE_OPEN_READ_ONLY` and then has
//! `PRAGMA query_only` switched on, so a write that slips past the classifier
//! still fails inside SQLite. Connections are never shared or pooled; each
//! one is dropped when [`run_query`] returns.

use std::path::Path;
use std::time::Duration;

use rusqlite::{types::ValueRef, Connection, OpenFlags};
use serde::Serialize;
use serde_json::Value;

use crate::config::DatabaseConfig;
use crate::error::GatewayError;

/// One result row, keyed by column name in result order
pub type Record = serde_json::Map<String, Value>;

/// Query result bounded by the row cap
#[derive(Debug, Clone, Serialize)]
pub struct RowSet {
    /// Column names in select-list order
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    /// Number of rows returned
    pub row_count: usize,
    /// True when the result had more rows than the cap
    pub truncated: bool,
}

/// Open a connection that cannot write, at the engine level
pub fn open_readonly(path: &Path, busy_timeout: Duration) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update(None, "query_only", true)?;
    Ok(conn)
}

/// Open a fresh read-only connection, run one statement, release the connection
pub fn run_query(
    db: &DatabaseConfig,
    sql: &str,
    max_rows: usize,
) -> Result<RowSet, GatewayError> {
    let conn = open_readonly(&db.path, Duration::from_secs(db.busy_timeout_secs))?;
    execute_bounded(&conn, sql, max_rows)
}

/// Execute a single statement and fetch at most `max_rows` rows
///
/// SQLite compiles only the first statement of `sql`; anything after it is
/// never stepped.
pub fn execute_bounded(
    conn: &Connection,
    sql: &str,
    max_rows: usize,
) -> Result<RowSet, GatewayError> {
    let mut stmt = conn.prepare(sql)?;

    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    let mut truncated = false;

    while let Some(row) = rows.next()? {
        if records.len() >= max_rows {
            truncated = true;
            break;
        }

        let mut record = Record::new();
        for (i, name) in columns.iter().enumerate() {
            record.insert(name.clone(), to_json(row.get_ref(i)?));
        }
        records.push(record);
    }

    Ok(RowSet {
        row_count: records.len(),
        columns,
        rows: records,
        truncated,
    })
}

/// Convert a SQLite scalar to JSON
pub fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => real_to_json(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<blob {} bytes>", b.len())),
    }
}

/// JSON has no infinities, so non-finite reals are spelled out as strings
fn real_to_json(f: f64) -> Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String("NaN".to_string()),
        None if f > 0.0 => Value::String("inf".to_string()),
        None => Value::String("-inf".to_string()),
    }
}
