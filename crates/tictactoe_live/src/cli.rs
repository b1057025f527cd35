//! Command-line interface for tictactoe_live.

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use tictactoe_core::Difficulty;

/// Tic-Tac-Toe Live - real-time rooms over WebSocket, or a local game in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe_live")]
#[command(about = "Real-time tic-tac-toe server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the room server (WebSocket + REST)
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, env = "TICTACTOE_CONFIG")]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long, env = "TICTACTOE_HOST")]
        host: Option<IpAddr>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long, env = "TICTACTOE_PORT")]
        port: Option<u16>,
    },

    /// Play against the computer in the terminal
    Play {
        /// Starting difficulty: easy, medium or hard
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Plies searched on medium
        #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=9))]
        medium_depth: u8,

        /// File that receives log output while the UI owns the terminal
        #[arg(long, default_value = "tictactoe_live.log")]
        log_file: PathBuf,
    },
}
