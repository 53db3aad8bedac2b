//! MCP Server implementation for the read-only SQL gateway
//!
//! Tool implementations live in the handlers module; this module only wires
//! them into the rmcp router.

use mcp_common::{CallToolResult, McpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::SqlGateway;
use crate::handlers;
use crate::params::*;

/// SQL Gateway MCP Server
#[derive(Clone)]
pub struct SqlGatewayServer {
    gateway: SqlGateway,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SqlGatewayServer {
    /// Create a server with explicit config
    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self::from_gateway(SqlGateway::new(config)?))
    }

    pub fn from_gateway(gateway: SqlGateway) -> Self {
        Self {
            gateway,
            tool_router: Self::tool_router(),
        }
    }

    pub fn gateway(&self) -> &SqlGateway {
        &self.gateway
    }

    #[tool(description = "Execute a SAFE read-only SQL query and return rows as JSON objects. \
        Supports multi-line SQL, WITH CTEs, joins, window functions, aggregations, and comments. \
        Blocks any mutation or DDL, PRAGMA, transaction control, and trailing statements. \
        Results are capped at the server's row limit.")]
    async fn run_select_query(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::run_select_query(&self.gateway, params).await
    }

    #[tool(description = "Describe the database: every table with its row count, columns \
        (type, primary key, nullability) and foreign-key relationships. Always reflects the \
        current schema.")]
    async fn get_database_schema(
        &self,
        Parameters(params): Parameters<SchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_database_schema(&self.gateway, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for SqlGatewayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Read-only SQL gateway over a SQLite database. Call get_database_schema \
                 to learn the tables, then run_select_query with a single SELECT or WITH \
                 statement. At most {} rows are returned per query.",
                self.gateway.config().limits.max_return_rows
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::ServerHandler;

    #[test]
    fn test_tools_registered() {
        let server = SqlGatewayServer::with_config(GatewayConfig::default()).unwrap();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["get_database_schema", "run_select_query"]);
    }

    #[test]
    fn test_info_mentions_row_cap() {
        let mut config = GatewayConfig::default();
        config.limits.max_return_rows = 42;
        let server = SqlGatewayServer::with_config(config).unwrap();

        let info = server.get_info();
        assert!(info.instructions.unwrap().contains("42 rows"));
    }
}
