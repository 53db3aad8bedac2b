//! Schema introspection
//!
//! Builds a [`SchemaDocument`] from SQLite catalog metadata on every call.
//! Table and column names interpolated into sub-queries come from the catalog
//! itself, never from callers, and are double-quoted so unusual names still
//! parse.

use std::time::Duration;

use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

use crate::config::{DatabaseConfig, SchemaConfig};
use crate::error::GatewayError;
use crate::executor::{open_readonly, to_json};

const DOCUMENT_TITLE: &str = "# Database Semantic Schema (LLM Optimized)";

/// Placeholder for columns declared without a type
const UNTYPED: &str = "—";

#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub row_count: i64,
    pub columns: Vec<ColumnDescriptor>,
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<ColumnProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: Option<String>,
    pub primary_key: bool,
    pub nullable: bool,
}

/// Foreign-key edge from a column of this table to another table
#[derive(Debug, Clone, Serialize)]
pub struct ForeignKey {
    pub column: String,
    pub target_table: String,
    /// `None` when the reference targets the implicit primary key
    pub target_column: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Every distinct non-null value is listed
    Enumerated,
    /// A bounded sample of distinct non-null values
    Sampled,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub column: String,
    pub distinct: i64,
    pub kind: ProfileKind,
    pub values: Vec<Value>,
}

/// Open a read-only connection and introspect the whole database
pub fn load_schema(
    db: &DatabaseConfig,
    options: &SchemaConfig,
) -> Result<SchemaDocument, GatewayError> {
    let conn = open_readonly(&db.path, Duration::from_secs(db.busy_timeout_secs)).map_err(
        |e| GatewayError::Introspection(format!("cannot open {}: {}", db.path.display(), e)),
    )?;
    introspect(&conn, options)
}

/// Enumerate user tables in name order with counts, columns, and keys
pub fn introspect(
    conn: &Connection,
    options: &SchemaConfig,
) -> Result<SchemaDocument, GatewayError> {
    let names = list_tables(conn)
        .map_err(|e| GatewayError::Introspection(format!("listing tables: {}", e)))?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let table = describe_table(conn, &name, options).map_err(|e| {
            GatewayError::Introspection(format!("reading table `{}`: {}", name, e))
        })?;
        tables.push(table);
    }

    Ok(SchemaDocument { tables })
}

fn list_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}

fn describe_table(
    conn: &Connection,
    table: &str,
    options: &SchemaConfig,
) -> rusqlite::Result<TableSchema> {
    let row_count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
        [],
        |row| row.get(0),
    )?;

    let columns = conn
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid")?
        .query_map([table], |row| {
            let declared: String = row.get(1)?;
            Ok(ColumnDescriptor {
                name: row.get(0)?,
                declared_type: (!declared.is_empty()).then_some(declared),
                nullable: row.get::<_, i64>(2)? == 0,
                primary_key: row.get::<_, i64>(3)? != 0,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let foreign_keys = conn
        .prepare(
            "SELECT \"from\", \"table\", \"to\" FROM pragma_foreign_key_list(?1) \
             ORDER BY id, seq",
        )?
        .query_map([table], |row| {
            Ok(ForeignKey {
                column: row.get(0)?,
                target_table: row.get(1)?,
                target_column: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let profiles = if options.profile_values && row_count <= options.max_profile_rows {
        columns
            .iter()
            .map(|c| profile_column(conn, table, &c.name, options))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    Ok(TableSchema {
        name: table.to_string(),
        row_count,
        columns,
        foreign_keys,
        profiles,
    })
}

fn profile_column(
    conn: &Connection,
    table: &str,
    column: &str,
    options: &SchemaConfig,
) -> rusqlite::Result<ColumnProfile> {
    let (t, c) = (quote_ident(table), quote_ident(column));

    let distinct: i64 = conn.query_row(
        &format!("SELECT COUNT(DISTINCT {c}) FROM {t}"),
        [],
        |row| row.get(0),
    )?;

    let (kind, limit) = if distinct <= options.low_cardinality_threshold as i64 {
        (ProfileKind::Enumerated, distinct)
    } else {
        (ProfileKind::Sampled, options.sample_limit as i64)
    };

    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {c} FROM {t} WHERE {c} IS NOT NULL ORDER BY 1 LIMIT ?1"
    ))?;
    let mut rows = stmt.query([limit])?;
    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        values.push(to_json(row.get_ref(0)?));
    }

    Ok(ColumnProfile {
        column: column.to_string(),
        distinct,
        kind,
        values,
    })
}

/// Double-quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl SchemaDocument {
    /// Render as markdown for humans and text generators
    pub fn to_markdown(&self) -> String {
        let mut md: Vec<String> = vec![format!("{}\n", DOCUMENT_TITLE)];

        for table in &self.tables {
            md.push(format!("## Table: {}\n", code_span(&table.name)));
            md.push(format!("**Row Count:** {}\n", table.row_count));

            md.push("| Column | Type | PK | Nullable |".to_string());
            md.push("|--------|------|----|----------|".to_string());
            for col in &table.columns {
                md.push(format!(
                    "| {} | {} | {} | {} |",
                    table_cell(&col.name),
                    table_cell(col.declared_type.as_deref().unwrap_or(UNTYPED)),
                    col.primary_key,
                    col.nullable
                ));
            }
            md.push(String::new());

            if !table.foreign_keys.is_empty() {
                md.push("**Relationships:**".to_string());
                for fk in &table.foreign_keys {
                    let target = match &fk.target_column {
                        Some(col) => format!("{}.{}", fk.target_table, col),
                        None => fk.target_table.clone(),
                    };
                    md.push(format!(
                        "- {} → {}",
                        code_span(&format!("{}.{}", table.name, fk.column)),
                        code_span(&target)
                    ));
                }
                md.push(String::new());
            }

            if !table.profiles.is_empty() {
                md.push("**Value Profile:**".to_string());
                for profile in &table.profiles {
                    md.push(render_profile(profile));
                }
                md.push(String::new());
            }

            md.push("---\n".to_string());
        }

        md.join("\n")
    }
}

fn render_profile(profile: &ColumnProfile) -> String {
    let values = profile
        .values
        .iter()
        .map(|v| match v {
            Value::String(s) => code_span(s),
            other => code_span(&other.to_string()),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let label = match profile.kind {
        ProfileKind::Enumerated => format!("{} distinct", profile.distinct),
        ProfileKind::Sampled => format!("{} distinct, sample", profile.distinct),
    };

    let column = code_span(&profile.column);
    if values.is_empty() {
        format!("- {} ({})", column, label)
    } else {
        format!("- {} ({}): {}", column, label, values)
    }
}

/// Text safe inside a markdown table cell
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Inline code span whose fence is longer than any backtick run in `text`
fn code_span(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ");
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);

    if longest_run == 0 {
        format!("`{}`", text)
    } else {
        let fence = "`".repeat(longest_run + 1);
        format!("{fence} {text} {fence}")
    }
}
