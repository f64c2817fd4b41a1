//! Client-side grid state.
//!
//! # Responsibility
//! - Track the last known server state and pending local edits separately.
//! - Expose staleness (edits whose server base moved) for inspection.
//! - Mirror the grid operations a client performs: load, edit, add row or
//!   column, and apply acknowledged deletes.
//!
//! # Invariants
//! - `server` only changes from server responses (snapshot, ack, delete ack).
//! - `pending` only changes from local edits, acks and rejections.
//! - A pending edit's `base` is the server value it was written over.
//! - Row and column coordinates never shift: deleting a row or column clears
//!   its cells in place, matching the store, which does not renumber.

use crate::grid::dense::{DenseGrid, DEFAULT_COLS, DEFAULT_ROWS};
use crate::model::cell::{Cell, CellCoord, CellIndex};
use std::collections::BTreeMap;

/// A local write not yet acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub value: String,
    /// Server value at the time of the edit; `None` when no cell existed.
    pub base: Option<String>,
}

/// Pending edit whose server value changed underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditConflict {
    pub coord: CellCoord,
    pub local: String,
    pub base: Option<String>,
    pub server: Option<String>,
}

/// Client-local view of the sparse store plus unacknowledged edits.
#[derive(Debug, Clone)]
pub struct GridSession {
    rows: usize,
    cols: usize,
    server: BTreeMap<CellCoord, String>,
    pending: BTreeMap<CellCoord, PendingEdit>,
}

impl GridSession {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            server: BTreeMap::new(),
            pending: BTreeMap::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Replaces the known server state with a full snapshot.
    ///
    /// Pending edits survive; use [`GridSession::conflicts`] to find the ones
    /// the snapshot invalidated.
    pub fn load_snapshot(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.server = cells
            .into_iter()
            .map(|cell| (cell.coord(), cell.value))
            .collect();
    }

    /// Records a local edit and returns the cell to send to the server.
    ///
    /// Re-editing a coordinate with an unacknowledged edit keeps the original
    /// base.
    pub fn edit(&mut self, coord: CellCoord, value: impl Into<String>) -> Cell {
        let value = value.into();
        let base = self.server.get(&coord).cloned();
        self.pending
            .entry(coord)
            .and_modify(|edit| edit.value.clone_from(&value))
            .or_insert_with(|| PendingEdit {
                value: value.clone(),
                base,
            });
        Cell::at(coord, value)
    }

    /// Applies a successful write response.
    ///
    /// The pending edit is cleared only when it matches the stored value; a
    /// newer local edit stays pending, rebased on the stored value.
    pub fn acknowledge(&mut self, stored: &Cell) {
        let coord = stored.coord();
        self.server.insert(coord, stored.value.clone());
        if let Some(edit) = self.pending.get_mut(&coord) {
            if edit.value == stored.value {
                self.pending.remove(&coord);
            } else {
                edit.base = Some(stored.value.clone());
            }
        }
    }

    /// Drops a pending edit after a failed write, reverting to server state.
    pub fn reject(&mut self, coord: CellCoord) -> Option<PendingEdit> {
        self.pending.remove(&coord)
    }

    /// Value a user sees at `coord`: pending edit, else server value, else empty.
    pub fn value_at(&self, coord: CellCoord) -> &str {
        self.pending
            .get(&coord)
            .map(|edit| edit.value.as_str())
            .or_else(|| self.server_value(coord))
            .unwrap_or("")
    }

    pub fn server_value(&self, coord: CellCoord) -> Option<&str> {
        self.server.get(&coord).map(String::as_str)
    }

    pub fn is_pending(&self, coord: CellCoord) -> bool {
        self.pending.contains_key(&coord)
    }

    /// Unacknowledged edits as cells, in row-major order.
    pub fn pending_cells(&self) -> Vec<Cell> {
        self.pending
            .iter()
            .map(|(coord, edit)| Cell::at(*coord, edit.value.clone()))
            .collect()
    }

    /// Pending edits whose base no longer matches the known server value.
    pub fn conflicts(&self) -> Vec<EditConflict> {
        self.pending
            .iter()
            .filter_map(|(coord, edit)| {
                let server = self.server.get(coord);
                (server != edit.base.as_ref()).then(|| EditConflict {
                    coord: *coord,
                    local: edit.value.clone(),
                    base: edit.base.clone(),
                    server: server.cloned(),
                })
            })
            .collect()
    }

    /// Appends a row, seeding it from the cells fetched for that row index.
    ///
    /// Fetched cells for any other row are ignored. Returns the new row index.
    pub fn append_row(&mut self, fetched: impl IntoIterator<Item = Cell>) -> usize {
        let index = self.rows;
        self.rows += 1;
        self.merge_fetched(fetched, |coord| coord.row_id as usize == index);
        index
    }

    /// Appends a column, seeding it from the cells fetched for that column
    /// index. Returns the new column index.
    pub fn append_column(&mut self, fetched: impl IntoIterator<Item = Cell>) -> usize {
        let index = self.cols;
        self.cols += 1;
        self.merge_fetched(fetched, |coord| coord.col_id as usize == index);
        index
    }

    /// Applies an acknowledged row delete.
    ///
    /// The trailing row is removed from the view; any other row is cleared
    /// in place.
    pub fn apply_row_delete(&mut self, row_id: CellIndex) {
        self.server.retain(|coord, _| coord.row_id != row_id);
        self.pending.retain(|coord, _| coord.row_id != row_id);
        if self.rows > 0 && row_id as usize == self.rows - 1 {
            self.rows -= 1;
        }
    }

    /// Applies an acknowledged column delete.
    ///
    /// The trailing column is removed from the view; any other column is
    /// cleared in place.
    pub fn apply_column_delete(&mut self, col_id: CellIndex) {
        self.server.retain(|coord, _| coord.col_id != col_id);
        self.pending.retain(|coord, _| coord.col_id != col_id);
        if self.cols > 0 && col_id as usize == self.cols - 1 {
            self.cols -= 1;
        }
    }

    /// Dense view of server state overlaid with pending edits.
    pub fn to_dense(&self) -> DenseGrid {
        let mut grid = DenseGrid::blank(self.rows, self.cols);
        for (coord, value) in &self.server {
            grid.place(coord.row_id, coord.col_id, value);
        }
        for (coord, edit) in &self.pending {
            grid.place(coord.row_id, coord.col_id, &edit.value);
        }
        grid
    }

    fn merge_fetched(
        &mut self,
        fetched: impl IntoIterator<Item = Cell>,
        belongs: impl Fn(&CellCoord) -> bool,
    ) {
        for cell in fetched {
            let coord = cell.coord();
            if belongs(&coord) {
                self.server.insert(coord, cell.value);
            }
        }
    }
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
