//! Command-line interface for chopsticks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::storage::StorageBackend;

/// Chopsticks - two-player finger game with a REST API
#[derive(Parser, Debug)]
#[command(name = "chopsticks")]
#[command(about = "Chopsticks finger game server", long_about = None)]
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
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Storage options
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Play a hot-seat game in the terminal
    Play {
        /// Storage options
        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Options shared by every command that opens a game.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Storage backend (memory or sqlite)
    #[arg(long)]
    pub storage: Option<StorageBackend>,

    /// Path to the SQLite database file
    #[arg(long)]
    pub db_path: Option<String>,
}
