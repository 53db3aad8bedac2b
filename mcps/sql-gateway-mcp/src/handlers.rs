//! Tool handlers
//!
//! Each handler delegates to the gateway and maps failures onto one MCP
//! error per operation, so callers can't tell a classifier rejection from
//! an engine failure except by message.

use mcp_common::{json_success, text_success, CallToolResult, McpError, ResultExt};

use crate::gateway::SqlGateway;
use crate::params::*;

pub async fn run_select_query(
    gateway: &SqlGateway,
    params: QueryParams,
) -> Result<CallToolResult, McpError> {
    let rows = gateway
        .execute_readonly_query(&params.query)
        .await
        .to_mcp_err()?;

    json_success(&rows)
}

pub async fn get_database_schema(
    gateway: &SqlGateway,
    params: SchemaParams,
) -> Result<CallToolResult, McpError> {
    let doc = gateway.get_schema_document().await.to_mcp_err()?;

    match params.format.unwrap_or_default() {
        SchemaFormat::Markdown => Ok(text_success(doc.to_markdown())),
        SchemaFormat::Json => json_success(&doc),
    }
}
