//! SQL Gateway MCP - read-only SQL access for agents
//!
//! Serves the gateway over MCP stdio by default, or runs a single query,
//! admission check, or schema dump from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sql_gateway_mcp::{classify, GatewayConfig, SqlGateway, SqlGatewayServer, Verdict};

#[derive(Parser)]
#[command(name = "sql-gateway-mcp")]
#[command(about = "Read-only SQL gateway for SQLite, served over MCP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (skips the standard config search, including
    /// SQL_GATEWAY_CONFIG_PATH)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// SQLite database to open read-only
    #[arg(long, env = "SQL_GATEWAY_DATABASE")]
    database: Option<PathBuf>,

    /// Maximum rows returned per query
    #[arg(long)]
    max_rows: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Run one read-only query and print the rows as JSON
    Query {
        /// SQL text
        sql: String,
    },
    /// Classify a query without running it
    Check {
        /// SQL text
        sql: String,
    },
    /// Print the schema document
    Schema {
        /// Print JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    mcp_common::init_tracing("sql_gateway_mcp")?;

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GatewayConfig::from_file(path)?,
        None => GatewayConfig::load(),
    };
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(max_rows) = cli.max_rows {
        config.limits.max_return_rows = max_rows;
    }

    let gateway = SqlGateway::new(config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!(
                database = %gateway.config().database.path.display(),
                "Starting sql_gateway_mcp MCP Server"
            );
            mcp_common::serve_stdio(SqlGatewayServer::from_gateway(gateway)).await?;
        }
        Commands::Query { sql } => {
            let rows = gateway.execute_readonly_query(&sql).await?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Check { sql } => match classify(&sql) {
            Verdict::Admitted => println!("admitted"),
            Verdict::Rejected(reason) => {
                eprintln!("rejected: {}", reason);
                std::process::exit(1);
            }
        },
        Commands::Schema { json } => {
            let doc = gateway.get_schema_document().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", doc.to_markdown());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_config_flag_leaves_env_var_to_config_search() {
        let cmd = Cli::command();
        let config = cmd
            .get_arguments()
            .find(|a| a.get_id() == "config")
            .unwrap();
        assert!(config.get_env().is_none());
    }

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::try_parse_from(["sql-gateway-mcp"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }
}
