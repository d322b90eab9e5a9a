//! Chopsticks - CLI entry point.

use std::sync::Arc;

use anyhow::Result;
use chopsticks::cli::{Cli, Command, StoreArgs};
use chopsticks::{AppState, ServerConfig, serve, terminal};
use clap::Parser;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, store } => run_server(host, port, store).await,
        Command::Play { store } => run_play(store),
    }
}

/// Loads config, layering CLI flags over file and environment.
fn load_config(
    store: StoreArgs,
    host: Option<String>,
    port: Option<u16>,
) -> Result<ServerConfig> {
    let config = ServerConfig::load(store.config.as_deref())?
        .with_overrides(host, port, store.storage, store.db_path);
    info!(?config, "Configuration loaded");
    Ok(config)
}

/// Run the HTTP game server
#[instrument(skip(store))]
async fn run_server(host: Option<String>, port: Option<u16>, store: StoreArgs) -> Result<()> {
    let config = load_config(store, host, port)?;
    let game = config.open_game()?;
    let state = Arc::new(AppState::new(game));

    info!(storage = %config.storage(), "Starting Chopsticks HTTP server");
    serve(state, config.host(), *config.port()).await
}

/// Run the terminal game
#[instrument(skip(store))]
fn run_play(store: StoreArgs) -> Result<()> {
    let config = load_config(store, None, None)?;
    let mut game = config.open_game()?;

    let stdin = std::io::stdin();
    terminal::run(&mut game, stdin.lock(), std::io::stdout())
}
