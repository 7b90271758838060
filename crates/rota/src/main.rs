//! # rota
//!
//! Todo API server binary — wires the store and HTTP surface together and
//! runs the serve loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rota_server::{AppState, ServerConfig, build_router};
use rota_store::{ConnectionConfig, TodoService, new_file, run_migrations};

/// Todo API server.
#[derive(Parser, Debug)]
#[command(name = "rota", about = "Todo API server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Path to the `SQLite` database. Falls back to the `DATABASE_URL`
    /// environment variable, then to `./todos.db`.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Insert the sample todo set on startup (no-op when data exists).
    #[arg(long)]
    seed: bool,
}

impl Cli {
    fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            std::env::var("DATABASE_URL")
                .map_or_else(|_| PathBuf::from("todos.db"), PathBuf::from)
        })
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Cli::parse();

    // Storage comes up before the listener so the schema is in place for
    // the first request.
    let db_path = args.resolve_db_path();
    ensure_parent_dir(&db_path)?;
    let pool = new_file(&db_path.to_string_lossy(), &ConnectionConfig::default())
        .context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let _ = run_migrations(&conn).context("Failed to run migrations")?;
    }
    info!(db = %db_path.display(), "database ready");

    let service = TodoService::new(pool);
    if args.seed {
        let inserted = service.seed().await.context("Failed to seed database")?;
        info!(inserted, "seed complete");
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}
