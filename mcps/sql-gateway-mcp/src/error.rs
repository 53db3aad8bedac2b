//! Error types for the SQL gateway

use mcp_common::{internal_error, IntoMcpError, McpError};
use thiserror::Error;

/// Reason a query was refused admission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Empty query.")]
    EmptyQuery,

    #[error("Only read-only SELECT queries are allowed.")]
    NotReadOnly,

    /// Offending tokens, sorted ascending
    #[error("Forbidden operation detected: {}", .0.join(", "))]
    ForbiddenOperation(Vec<String>),
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("{0}")]
    Execution(String),

    #[error("{0}")]
    Introspection(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the error came from the admission guard rather than the engine
    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Rejected(_))
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(err: rusqlite::Error) -> Self {
        GatewayError::Execution(err.to_string())
    }
}

impl IntoMcpError for GatewayError {
    fn into_mcp_error(self) -> McpError {
        match self {
            GatewayError::Introspection(msg) => {
                internal_error(format!("Schema introspection failed: {}", msg))
            }
            GatewayError::Config(_) => internal_error(self.to_string()),
            // Rejections and engine failures share one channel
            other => internal_error(format!("Query failed: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_message_lists_tokens() {
        let err = Rejection::ForbiddenOperation(vec!["delete".into(), "drop".into()]);
        assert_eq!(err.to_string(), "Forbidden operation detected: delete, drop");
    }

    #[test]
    fn test_rejection_and_execution_share_channel() {
        let rejected = GatewayError::from(Rejection::NotReadOnly).into_mcp_error();
        let failed = GatewayError::Execution("no such table: x".into()).into_mcp_error();

        assert_eq!(rejected.code.0, failed.code.0);
        assert_eq!(
            rejected.message,
            "Query failed: Only read-only SELECT queries are allowed."
        );
        assert_eq!(failed.message, "Query failed: no such table: x");
    }

    #[test]
    fn test_introspection_message_is_distinct() {
        let err = GatewayError::Introspection("database is locked".into()).into_mcp_error();
        assert!(err.message.starts_with("Schema introspection failed:"));
    }
}
