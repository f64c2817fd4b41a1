//! REST routes for the cell store.
//!
//! # Responsibility
//! - Translate coordinate-addressed requests into one service call each.
//! - Shape responses as cell JSON or delete acknowledgments.
//!
//! # Invariants
//! - Path and body coordinates are validated before any store access.
//! - Deletes acknowledge success even when nothing matched.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use cellgrid_core::{core_version, parse_index, ping, Axis, Cell, CellWriteRequest};
use log::debug;
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Prefix under which the cell routes are also mounted.
pub const API_PREFIX: &str = "/api";

const ROW_DELETED_MESSAGE: &str = "Row deleted successfully";
const COLUMN_DELETED_MESSAGE: &str = "Column deleted successfully";

#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub message: &'static str,
    /// Cells removed; informational only.
    pub deleted: usize,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub ping: &'static str,
    pub version: &'static str,
}

/// Builds the application router.
///
/// Cell routes are served both at the root and under [`API_PREFIX`].
pub fn router(state: AppState) -> Router {
    let cells = cell_routes();
    Router::new()
        .route("/health", get(health))
        .merge(cells.clone())
        .nest(API_PREFIX, cells)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn cell_routes() -> Router<AppState> {
    Router::new()
        .route("/cells", get(list_cells).put(put_cell))
        .route("/cells/row/:row_id", get(list_row))
        .route("/cells/column/:col_id", get(list_column).delete(delete_column))
        .route("/cells/:row_id", delete(delete_row))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        ping: ping(),
        version: core_version(),
    })
}

async fn put_cell(
    State(state): State<AppState>,
    body: Result<Json<CellWriteRequest>, JsonRejection>,
) -> Result<Json<Cell>, ApiError> {
    let Json(request) = body?;
    let cell = request.into_cell()?;
    let stored = state
        .with_cells(move |cells| cells.put_cell(&cell))
        .await?;
    debug!(
        "event=cell_write module=api status=ok row_id={} col_id={}",
        stored.row_id, stored.col_id
    );
    Ok(Json(stored))
}

async fn list_cells(State(state): State<AppState>) -> Result<Json<Vec<Cell>>, ApiError> {
    let cells = state.with_cells(|cells| cells.list_cells()).await?;
    debug!("event=cell_list module=api status=ok scope=all count={}", cells.len());
    Ok(Json(cells))
}

async fn list_row(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<Cell>>, ApiError> {
    let row_id = parse_index(Axis::Row, &raw)?;
    let cells = state.with_cells(move |cells| cells.row_cells(row_id)).await?;
    debug!(
        "event=cell_list module=api status=ok scope=row row_id={row_id} count={}",
        cells.len()
    );
    Ok(Json(cells))
}

async fn list_column(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<Cell>>, ApiError> {
    let col_id = parse_index(Axis::Column, &raw)?;
    let cells = state
        .with_cells(move |cells| cells.column_cells(col_id))
        .await?;
    debug!(
        "event=cell_list module=api status=ok scope=column col_id={col_id} count={}",
        cells.len()
    );
    Ok(Json(cells))
}

async fn delete_row(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let row_id = parse_index(Axis::Row, &raw)?;
    let outcome = state.with_cells(move |cells| cells.delete_row(row_id)).await?;
    Ok(Json(DeleteAck {
        message: ROW_DELETED_MESSAGE,
        deleted: outcome.removed,
    }))
}

async fn delete_column(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let col_id = parse_index(Axis::Column, &raw)?;
    let outcome = state
        .with_cells(move |cells| cells.delete_column(col_id))
        .await?;
    Ok(Json(DeleteAck {
        message: COLUMN_DELETED_MESSAGE,
        deleted: outcome.removed,
    }))
}
