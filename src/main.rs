//! student-api server: loads config, opens SQLite storage, serves until Ctrl+C / SIGTERM.

use clap::Parser;
use std::sync::Arc;
use student_api::{app, shutdown_signal, AppState, Server, ServiceConfig, SqliteStudentStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "student-api", version, about)]
struct Args {
    /// Path to YAML config file. Falls back to CONFIG_PATH, then to environment variables.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = ServiceConfig::load(args.config.as_deref())?;

    let store = SqliteStudentStore::connect(&config.storage_path).await?;
    tracing::info!(env = %config.env, version = env!("CARGO_PKG_VERSION"), "storage initialized");

    let state = AppState::new(Arc::new(store));
    let router = app(state, config.http_server.max_body_bytes);
    let server = Server::bind(&config.http_server.address, router).await?;

    shutdown_signal().await;

    if let Err(e) = server.shutdown(config.http_server.shutdown_grace()).await {
        tracing::error!(error = %e, "failed to shut down server cleanly");
        return Err(e.into());
    }
    Ok(())
}
