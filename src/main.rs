//! Blockhost - MCP bridge for block-model editors
//!
//! Usage:
//!   blockhost mcp                Start MCP server on stdio
//!   blockhost --help             Show all commands

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use blockhost::host::NoopHost;
use blockhost::mcp::run_mcp_server;

#[derive(Parser)]
#[command(name = "blockhost", version, about = "MCP bridge for block-model editors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio.
    Mcp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr (safe for MCP stdio transport)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockhost=info".parse()?),
        )
        .init();

    match cli.command {
        Commands::Mcp => run_mcp_server(Arc::new(NoopHost)).await?,
    }

    Ok(())
}
