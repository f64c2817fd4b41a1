//! HTTP surface for the cellgrid store.
//!
//! # Responsibility
//! - Expose cell store operations as REST routes.
//! - Own process lifecycle: store bootstrap, listen, graceful shutdown.
//!
//! # Invariants
//! - Handlers never touch SQL directly; they go through `CellService`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};
pub use routes::{router, API_PREFIX};
pub use state::AppState;

use cellgrid_core::db::open_db;
use log::{info, warn};
use tokio::net::TcpListener;

/// Opens the store, binds the listener and serves until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let state = AppState::new(conn)?;

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "event=server_listen module=server status=ok addr={} db_path={}",
        listener.local_addr()?,
        config.db_path.display()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=server status=error error={err}");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("event=server_signal module=server status=ok signal=ctrl_c");
}
