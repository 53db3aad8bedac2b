//! Server initialization utilities

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for an MCP server
///
/// Logs go to stderr because stdout carries the MCP protocol. `RUST_LOG`
/// filters as usual, with `<crate_name>=info` added by default.
/// Set `LOG_FORMAT=json` for JSON lines.
///
/// # Arguments
///
/// * `crate_name` - The name of the MCP server crate (e.g., "sql_gateway_mcp")
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("sql_gateway_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Serve `server` over stdio until the client disconnects
///
/// Takes an already-built server so `main` can parse its CLI and load
/// config first.
///
/// # Arguments
///
/// * `server` - Any rmcp `ServerHandler`
///
/// # Example
///
/// ```rust,ignore
/// use mcp_common::{init_tracing, serve_stdio};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     init_tracing("sql_gateway_mcp")?;
///     let server = SqlGatewayServer::with_config(GatewayConfig::load())?;
///     serve_stdio(server).await
/// }
/// ```
pub async fn serve_stdio<S: ServerHandler>(server: S) -> anyhow::Result<()> {
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
