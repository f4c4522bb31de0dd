//! Versus - REST tic-tac-toe server binary.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use versus_server::{AppState, GameRepository, GameService, ServerConfig, router};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            database,
        } => {
            let config = load_config(config, host, port, database)?;
            run_server(config).await
        }
        Command::Migrate { config, database } => {
            let config = load_config(config, None, None, database)?;
            run_migrations(&config)
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,versus_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[instrument]
fn load_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
) -> Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?.with_overrides(host, port, database);
    info!(?config, "Configuration resolved");
    Ok(config)
}

#[instrument(skip(config))]
fn run_migrations(config: &ServerConfig) -> Result<()> {
    let repo = GameRepository::new(config.database_url().clone())?;
    let applied = repo.run_migrations()?;
    info!(applied, path = %repo.db_path(), "Database ready");
    Ok(())
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let repo = GameRepository::new(config.database_url().clone())?;
    repo.run_migrations()?;

    let state = AppState::new(GameService::with_defaults(repo));
    let app = router(state, config.cors_origins());

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(%address, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
