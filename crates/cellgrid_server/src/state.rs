//! Shared router state.
//!
//! # Responsibility
//! - Own the single store connection used by every request.
//! - Run store work off the async runtime threads.
//!
//! # Invariants
//! - Each request holds the connection lock for one store operation only.
//! - The connection is schema-checked once, before the server accepts
//!   requests; request paths skip the check.

use crate::error::ApiError;
use cellgrid_core::{
    ensure_connection_ready, CellService, RepoError, RepoResult, SqliteCellRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection after checking its schema once.
    ///
    /// # Errors
    /// Returns the repository readiness error when the schema is not usable.
    pub fn new(conn: Connection) -> Result<Self, RepoError> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the cell service on the blocking thread pool.
    pub async fn with_cells<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&CellService<SqliteCellRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let guard = conn
                .lock()
                .map_err(|_| ApiError::Internal("store connection mutex poisoned".to_string()))?;
            let service = CellService::new(SqliteCellRepository::new(&guard));
            Ok(op(&service)?)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
    }
}
