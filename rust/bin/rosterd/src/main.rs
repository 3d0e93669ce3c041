//! `rosterd`: the roster server binary.
//!
//! Usage:
//!   rosterd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/roster/<name>.toml`.
//! A value containing `/` or ending in `.toml` is used as a path.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use roster_core::Module;
use staff::StaffModule;
use staff::store::{SqliteStaffStore, StaffStore};
use tracing::info;

use config::ServerConfig;

/// Roster server.
#[derive(Parser, Debug)]
#[command(name = "rosterd", about = "Roster staff server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    bootstrap::verify_config(&server_config)?;

    std::fs::create_dir_all(&server_config.storage.data_dir)?;
    let sqlite_path = server_config.storage.resolve_sqlite_path();
    let store: Arc<dyn StaffStore> = Arc::new(
        SqliteStaffStore::open(&sqlite_path)
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    info!("SQLite store opened at {}", sqlite_path.display());

    let staff_module = StaffModule::new(store, server_config.password.clone())?;
    info!("{} module initialized", staff_module.name());

    let app = routes::build_router(vec![staff_module.routes()]);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("Roster server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
