//! Command-line interface for the versus server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Versus - human-vs-bot tic-tac-toe server
#[derive(Parser, Debug)]
#[command(name = "versus")]
#[command(about = "REST game server for human-vs-bot tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
    },
}
