//! Cell access use-case service.
//!
//! # Responsibility
//! - Provide the coordinate-addressed entry points used by the HTTP layer.
//! - Delegate persistence to a `CellRepository` implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Every call performs exactly one store operation.

use crate::model::cell::{Cell, CellCoord, CellIndex};
use crate::repo::cell_repo::{CellRepository, RepoResult};

/// Acknowledgment returned by row/column deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of cells removed. Zero is a successful outcome.
    pub removed: usize,
}

/// Use-case service wrapper for cell operations.
pub struct CellService<R: CellRepository> {
    repo: R,
}

impl<R: CellRepository> CellService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Writes `value` at `coord`, replacing any existing value.
    pub fn write_cell(&self, coord: CellCoord, value: impl Into<String>) -> RepoResult<Cell> {
        self.repo.upsert_cell(&Cell::at(coord, value))
    }

    /// Persists an already validated cell record.
    pub fn put_cell(&self, cell: &Cell) -> RepoResult<Cell> {
        self.repo.upsert_cell(cell)
    }

    pub fn list_cells(&self) -> RepoResult<Vec<Cell>> {
        self.repo.list_cells()
    }

    pub fn row_cells(&self, row_id: CellIndex) -> RepoResult<Vec<Cell>> {
        self.repo.list_row(row_id)
    }

    pub fn column_cells(&self, col_id: CellIndex) -> RepoResult<Vec<Cell>> {
        self.repo.list_column(col_id)
    }

    /// Deletes a row. Deleting an empty or unknown row still succeeds.
    pub fn delete_row(&self, row_id: CellIndex) -> RepoResult<DeleteOutcome> {
        let removed = self.repo.delete_row(row_id)?;
        Ok(DeleteOutcome { removed })
    }

    /// Deletes a column. Deleting an empty or unknown column still succeeds.
    pub fn delete_column(&self, col_id: CellIndex) -> RepoResult<DeleteOutcome> {
        let removed = self.repo.delete_column(col_id)?;
        Ok(DeleteOutcome { removed })
    }
}
