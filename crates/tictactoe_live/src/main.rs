//! Tic-Tac-Toe Live - unified CLI
//!
//! `serve` runs the room server, `play` a local game in the terminal.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::net::IpAddr;
use std::path::PathBuf;
use tictactoe_server::ServerConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Play {
            difficulty,
            medium_depth,
            log_file,
        } => tui::run_tui(difficulty, medium_depth, &log_file),
    }
}

/// Run the room server
#[instrument(skip_all)]
async fn run_server(config: Option<PathBuf>, host: Option<IpAddr>, port: Option<u16>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tictactoe_server=debug")),
        )
        .init();

    let mut config = match config {
        Some(path) => ServerConfig::from_file(&path).with_context(|| format!("Loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    info!(
        addr = %config.socket_addr(),
        computer = %config.computer(),
        default_difficulty = %config.default_difficulty(),
        "Starting tic-tac-toe server"
    );
    tictactoe_server::serve(config).await?;
    Ok(())
}
