//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Successful response carrying `data` as pretty-printed JSON text
///
/// # Arguments
///
/// * `data` - Any type that implements `Serialize`
///
/// # Returns
///
/// * `Ok(CallToolResult)` with pretty-printed JSON content
/// * `Err(McpError)` if serialization fails
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// async fn run_select_query(&self, sql: String) -> Result<CallToolResult, McpError> {
///     let rows = self.gateway.execute_readonly_query(&sql).await.to_mcp_err()?;
///     json_success(&rows)
/// }
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Successful plain text response, e.g. a markdown document
///
/// # Arguments
///
/// * `text` - Any type that can be converted to a `String`
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::text_success;
///
/// let md = self.gateway.schema_markdown().await.to_mcp_err()?;
/// Ok(text_success(md))
/// ```
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Rows {
        row_count: usize,
        truncated: bool,
    }

    #[test]
    fn test_json_success() {
        let result = json_success(&Rows {
            row_count: 3,
            truncated: false,
        })
        .unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_text_success() {
        let result = text_success("# Schema");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }
}
