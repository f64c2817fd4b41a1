//! Loosely typed cell write input.
//!
//! # Responsibility
//! - Accept the write payload shape `{rowId, colId, value}` from clients.
//! - Coerce it into a validated `Cell` in one place.
//!
//! # Invariants
//! - `value` is optional; absent or `null` means empty text.
//! - Scalar non-string values are stored as their JSON text.

use crate::model::cell::Cell;
use crate::model::coordinate::{resolve_coordinate, Axis, CoordinateError, RawCoordinate};
use serde::Deserialize;

/// Scalar value as received from a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawValue {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// Unvalidated upsert request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellWriteRequest {
    #[serde(default)]
    pub row_id: Option<RawCoordinate>,
    #[serde(default)]
    pub col_id: Option<RawCoordinate>,
    #[serde(default)]
    pub value: Option<RawValue>,
}

impl CellWriteRequest {
    /// Validates coordinates and returns the cell to persist.
    pub fn into_cell(self) -> Result<Cell, CoordinateError> {
        let row_id = resolve_coordinate(Axis::Row, self.row_id.as_ref())?;
        let col_id = resolve_coordinate(Axis::Column, self.col_id.as_ref())?;
        let value = self.value.map(RawValue::into_text).unwrap_or_default();
        Ok(Cell::new(row_id, col_id, value))
    }
}
