//! spotify-mcp - Spotify account control over the Model Context Protocol
//!
//! Usage:
//!   spotify-mcp                       Start MCP server on stdio
//!   spotify-mcp --config cfg.toml     Use an explicit config file
//!   spotify-mcp --log-file mcp.log    Append logs to a file instead of stderr

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;

use spotify_mcp::config::Config;
use spotify_mcp::init::AppContext;
use spotify_mcp::mcp::server::run_mcp_server;

#[derive(Debug, Parser)]
#[command(name = "spotify-mcp", version, about = "Spotify MCP server (stdio)")]
struct Cli {
    /// Config file (default: $SPOTIFY_MCP_CONFIG or <config dir>/spotify-mcp/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = Config::load(cli.config.as_deref())?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("spotify_mcp=info".parse()?);

    // Never log to stdout: it carries the MCP transport.
    match cli.log_file.as_ref().or(config.log_file.as_ref()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }

    source.log();

    let ctx = AppContext::from_config(config)?;
    run_mcp_server(ctx).await?;

    Ok(())
}
