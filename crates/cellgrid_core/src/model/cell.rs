//! Cell domain model.
//!
//! # Responsibility
//! - Define the single persisted record: one value at one grid coordinate.
//! - Provide the ordered coordinate key used by sparse maps.
//!
//! # Invariants
//! - At most one `Cell` exists per `CellCoord`.
//! - A missing cell is equivalent to a cell holding an empty value.

use serde::{Deserialize, Serialize};

/// Zero-based row or column index.
pub type CellIndex = u32;

/// Grid coordinate of a cell.
///
/// Orders row-major, so a `BTreeMap<CellCoord, _>` iterates rows top to bottom
/// and columns left to right within each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCoord {
    pub row_id: CellIndex,
    pub col_id: CellIndex,
}

impl CellCoord {
    pub fn new(row_id: CellIndex, col_id: CellIndex) -> Self {
        Self { row_id, col_id }
    }
}

/// Canonical stored cell.
///
/// Serialized with external key names `rowId`, `colId` and `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row_id: CellIndex,
    pub col_id: CellIndex,
    /// Raw text content. Never interpreted.
    #[serde(default)]
    pub value: String,
}

impl Cell {
    pub fn new(row_id: CellIndex, col_id: CellIndex, value: impl Into<String>) -> Self {
        Self {
            row_id,
            col_id,
            value: value.into(),
        }
    }

    /// Creates a cell at `coord`.
    pub fn at(coord: CellCoord, value: impl Into<String>) -> Self {
        Self::new(coord.row_id, coord.col_id, value)
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.row_id, self.col_id)
    }

    /// Returns whether this cell renders identically to an absent one.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}
