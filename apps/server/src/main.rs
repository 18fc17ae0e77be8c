//! # KidsPOS Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Startup                                        │
//! │                                                                         │
//! │  Config::load (.env + environment)                                      │
//! │     │                                                                   │
//! │     ├─► Database::new  (SQLite, WAL, migrations)                        │
//! │     ├─► upload dir     (created if missing)                             │
//! │     ├─► AppState::new  (repositories → services)                        │
//! │     └─► axum::serve on 0.0.0.0:PORT until Ctrl+C / SIGTERM              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kidspos_db::{Database, DbConfig};
use kidspos_server::storage::ApkStorage;
use kidspos_server::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kidspos=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting KidsPOS server...");

    let config = Config::load().context("failed to load configuration")?;
    info!(
        port = config.port,
        database = %config.database_path.display(),
        apk_dir = %config.apk_upload_dir.display(),
        apk_max_file_size = config.apk_max_file_size,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(config.database_path.clone()))
        .await
        .context("failed to open database")?;

    ApkStorage::new(config.apk_upload_dir.clone())
        .ensure_dir()
        .await
        .with_context(|| format!("failed to create {}", config.apk_upload_dir.display()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(db.clone(), config);
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
