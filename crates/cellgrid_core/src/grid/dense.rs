//! Dense grid projection over sparse cells.
//!
//! # Responsibility
//! - Materialize a fixed-size matrix of display values from sparse cells.
//!
//! # Invariants
//! - Projection is pure: the same cells and size always give the same grid.
//! - Cells outside the requested bounds are dropped, not an error.
//! - Coordinates without a cell render as empty text.

use crate::model::cell::{Cell, CellIndex};
use serde::Serialize;

/// Row count of a freshly opened grid.
pub const DEFAULT_ROWS: usize = 3;
/// Column count of a freshly opened grid.
pub const DEFAULT_COLS: usize = 3;

/// Row-major matrix of display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseGrid {
    cols: usize,
    rows: Vec<Vec<String>>,
}

impl DenseGrid {
    /// Creates a grid of empty values.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            rows: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Places `cells` into a `rows x cols` grid.
    pub fn from_cells<'a>(
        cells: impl IntoIterator<Item = &'a Cell>,
        rows: usize,
        cols: usize,
    ) -> Self {
        let mut grid = Self::blank(rows, cols);
        for cell in cells {
            grid.place(cell.row_id, cell.col_id, &cell.value);
        }
        grid
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Returns the value at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Writes a value if the coordinate is inside the grid.
    ///
    /// Returns whether the value was placed.
    pub(crate) fn place(&mut self, row_id: CellIndex, col_id: CellIndex, value: &str) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row_id), usize::try_from(col_id)) else {
            return false;
        };
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(slot) => {
                slot.clear();
                slot.push_str(value);
                true
            }
            None => false,
        }
    }
}

impl Default for DenseGrid {
    fn default() -> Self {
        Self::blank(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
