//! Error conversion for MCP tool handlers

use rmcp::ErrorData as McpError;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Conversion of a domain error into the single error a tool call reports
///
/// Implementors decide how much of the failure reaches the client; the
/// message is all the client ever sees.
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::{internal_error, IntoMcpError, McpError};
///
/// impl IntoMcpError for GatewayError {
///     fn into_mcp_error(self) -> McpError {
///         internal_error(format!("Query failed: {}", self))
///     }
/// }
/// ```
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

/// Adds `to_mcp_err()` to any `Result` whose error implements [`IntoMcpError`]
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::{json_success, ResultExt};
///
/// let rows = gateway.execute_readonly_query(&sql).await.to_mcp_err()?;
/// json_success(&rows)
/// ```
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}

/// Create an internal error with a message
///
/// # Arguments
///
/// * `message` - Text shown to the client as the error message
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::internal_error;
///
/// return Err(internal_error("Schema introspection failed: database is locked"));
/// ```
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}
