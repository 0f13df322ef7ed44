//! zk Notes MCP Server Binary Entry Point
//!
//! ```bash
//! ZK_DIR=~/notes zk-notes-mcp
//! RUST_LOG=debug zk-notes-mcp --config ~/.config/zk-notes.yaml
//! ```
//!
//! Logs go to stderr; stdout carries the protocol.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use zk_notes_core::{Handlers, ZkConfig};
use zk_notes_mcp::McpServer;

/// MCP server exposing a zk notebook as tools
#[derive(Parser, Debug)]
#[command(name = "zk-notes-mcp")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "ZK_NOTES_CONFIG")]
    config: Option<PathBuf>,

    /// Notebook directory (overrides config and ZK_DIR)
    #[arg(long)]
    zk_dir: Option<PathBuf>,

    /// zk executable (overrides config and ZK_BINARY)
    #[arg(long)]
    zk_binary: Option<String>,
}

fn load_config(args: &Args) -> Result<ZkConfig> {
    let mut config = match &args.config {
        Some(path) => ZkConfig::load(path)?,
        None => ZkConfig::default(),
    };
    config.apply_env();

    if let Some(dir) = &args.zk_dir {
        config.notebook_dir = dir.clone();
    }
    if let Some(binary) = &args.zk_binary {
        config.zk_binary = binary.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Notebook: {:?}", config.notebook_dir);
    log::info!("zk binary: {}", config.zk_binary);

    let mut server = McpServer::new(Handlers::new(&config));
    if let Err(e) = server.run().await {
        log::error!("MCP server error: {}", e);
        return Err(e);
    }

    Ok(())
}
