//! bandstore-api - REST service for bands and their albums
//!
//! Settings resolve as CLI flag > environment variable > config file >
//! compiled default. The database pool is opened here and closed after the
//! server has drained.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bandstore_common::config::{ConfigOverrides, ServerConfig, DEFAULT_LOG_LEVEL};
use bandstore_common::db::{init_database, init_in_memory};
use bandstore_api::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for bandstore-api
#[derive(Parser, Debug)]
#[command(name = "bandstore-api")]
#[command(about = "REST API for bands and their albums")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BANDSTORE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BANDSTORE_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "BANDSTORE_DATABASE")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "BANDSTORE_CONFIG")]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. "bandstore_api=debug"
    #[arg(long, env = "BANDSTORE_LOG")]
    log_level: Option<String>,

    /// Run against a private in-memory database
    #[arg(long)]
    in_memory: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::load(args.config.clone(), args.overrides())
        .context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bandstore-api v{}", env!("CARGO_PKG_VERSION"));

    let pool = if args.in_memory {
        info!("Using in-memory database");
        init_in_memory().await
    } else {
        info!("Database path: {}", config.database_path.display());
        init_database(&config.database_path).await
    }
    .context("Failed to initialize database")?;

    let app = build_router(AppState::new(pool.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("bandstore-api listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
