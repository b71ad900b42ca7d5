mod cache;
mod config;
mod error;
mod github;
mod handlers;
mod http;
mod metrics;
mod permissions;
mod repo;
mod roles;
mod server;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use github::GithubTokenVerifier;
use http::{build_router, AppState};
use labbook_store_sqlite::SqliteStore;
use server::ApiServer;

// ───────────────────────────────── CLI ─────────────────────────────────

#[derive(Parser)]
#[command(name = "labbook-server")]
#[command(about = "Labbook workspace/project management server")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Server address
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,
    },
}

async fn cmd_serve(
    database_url: Option<String>,
    addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: std::net::SocketAddr = addr.parse()?;

    let db_url = database_url.unwrap_or_else(|| "sqlite://labbook.db?mode=rwc".to_string());
    let store = Arc::new(SqliteStore::open(&db_url).await?);

    let config = ServerConfig::from_env()?;
    tracing::info!(
        admin_users = config.admin_user_ids.len(),
        cors_origins = ?config.cors_origins,
        "configuration loaded"
    );

    let verifier = Arc::new(GithubTokenVerifier::new(config.github_api_base.clone()));
    let server = Arc::new(ApiServer::new(store, verifier, config));

    let handle = metrics::init_metrics();
    let router = build_router(AppState {
        server,
        metrics: handle,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "labbook-server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("received SIGTERM, shutting down gracefully");
        }
        _ = sigint.recv() => {
            tracing::info!("received SIGINT, shutting down gracefully");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { addr } => {
            cmd_serve(cli.database_url, &addr).await?;
        }
    }

    Ok(())
}
