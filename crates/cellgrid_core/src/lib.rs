//! Core domain logic for the cellgrid spreadsheet store.
//! This crate owns the cell model, the sparse store and its invariants.

pub mod db;
pub mod grid;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use grid::dense::{DenseGrid, DEFAULT_COLS, DEFAULT_ROWS};
pub use grid::session::{EditConflict, GridSession, PendingEdit};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::cell::{Cell, CellCoord, CellIndex};
pub use model::coordinate::{parse_index, Axis, CoordinateError, RawCoordinate};
pub use model::request::{CellWriteRequest, RawValue};
pub use repo::cell_repo::{
    ensure_connection_ready, CellRepository, RepoError, RepoResult, SqliteCellRepository,
};
pub use service::cell_service::{CellService, DeleteOutcome};

/// Minimal health-check probe.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
