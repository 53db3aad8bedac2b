//! SQL Gateway MCP Library
//!
//! Read-only query gateway for SQLite databases. Untrusted SQL passes through
//! a layered guard before it can run:
//!
//! - [`comments`] strips comments so nothing hides inside them
//! - [`classifier`] admits only `SELECT`/`WITH` statements free of write keywords
//! - [`executor`] runs the original text on a connection SQLite itself keeps
//!   read-only, capping the rows returned
//! - [`schema`] describes the catalog for callers that write the SQL
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use sql_gateway_mcp::{GatewayConfig, SqlGateway};
//!
//! let gateway = SqlGateway::new(GatewayConfig::with_database("university.db"))?;
//! let rows = gateway.execute_readonly_query("SELECT name FROM students").await?;
//! let schema = gateway.schema_markdown().await?;
//! ```

pub mod classifier;
pub mod comments;
pub mod config;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod handlers;
pub mod params;
pub mod schema;
pub mod server;

pub use classifier::{classify, validate, Verdict};
pub use config::GatewayConfig;
pub use error::{GatewayError, Rejection};
pub use executor::RowSet;
pub use gateway::SqlGateway;
pub use schema::SchemaDocument;
pub use server::SqlGatewayServer;

// Re-export parameter types for direct API usage
pub use params::*;
