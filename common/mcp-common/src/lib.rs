//! MCP Common - Shared plumbing for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`]
//! - **Results**: [`json_success`] and [`text_success`] for `CallToolResult`s
//! - **Errors**: [`IntoMcpError`] / [`ResultExt`] so domain errors work with `?`
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_success, ResultExt};
//!
//! async fn my_tool(&self) -> Result<CallToolResult, McpError> {
//!     let data = self.domain_call().await.to_mcp_err()?;
//!     json_success(&data)
//! }
//! ```

pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use error::{internal_error, IntoMcpError, McpResult, ResultExt};
pub use init::{init_tracing, serve_stdio};
pub use result::{json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
