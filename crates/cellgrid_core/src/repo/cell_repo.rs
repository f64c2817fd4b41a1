//! Cell repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the sparse `(row, column) -> value` store operations.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Upserts rely on the `(row_id, col_id)` unique index; no application
//!   locking guards the coordinate.
//! - Deletes by row or column are unconditional and report affected counts.
//! - Read paths reject persisted coordinates that are not valid `CellIndex`
//!   values instead of masking them.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::cell::{Cell, CellIndex};
use log::debug;
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CELL_SELECT_SQL: &str = "SELECT row_id, col_id, value FROM cells";
const CELL_ORDER_SQL: &str = "ORDER BY row_id ASC, col_id ASC";
const CELLS_TABLE: &str = "cells";
const REQUIRED_CELL_COLUMNS: &[&str] = &["row_id", "col_id", "value", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for cell persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted cell data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the sparse cell store.
pub trait CellRepository {
    /// Creates or replaces the cell at the record's coordinate.
    fn upsert_cell(&self, cell: &Cell) -> RepoResult<Cell>;
    /// Returns every stored cell.
    fn list_cells(&self) -> RepoResult<Vec<Cell>>;
    fn list_row(&self, row_id: CellIndex) -> RepoResult<Vec<Cell>>;
    fn list_column(&self, col_id: CellIndex) -> RepoResult<Vec<Cell>>;
    /// Removes all cells in the row and returns how many were removed.
    fn delete_row(&self, row_id: CellIndex) -> RepoResult<usize>;
    /// Removes all cells in the column and returns how many were removed.
    fn delete_column(&self, col_id: CellIndex) -> RepoResult<usize>;
}

/// SQLite-backed cell repository.
pub struct SqliteCellRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCellRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `cells`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }

    /// Wraps a connection without schema checks.
    ///
    /// Callers must have validated the same connection through
    /// [`SqliteCellRepository::try_new`] or [`ensure_connection_ready`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_cells<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Cell>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params)?;
        let mut cells = Vec::new();
        while let Some(row) = rows.next()? {
            cells.push(parse_cell_row(row)?);
        }
        Ok(cells)
    }
}

impl CellRepository for SqliteCellRepository<'_> {
    fn upsert_cell(&self, cell: &Cell) -> RepoResult<Cell> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO cells (row_id, col_id, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (row_id, col_id) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000)
             RETURNING row_id, col_id, value;",
        )?;
        let mut rows = stmt.query(params![cell.row_id, cell.col_id, cell.value.as_str()])?;
        let stored = match rows.next()? {
            Some(row) => parse_cell_row(row)?,
            None => {
                return Err(RepoError::InvalidData(format!(
                    "upsert at ({}, {}) returned no row",
                    cell.row_id, cell.col_id
                )));
            }
        };

        debug!(
            "event=cell_upsert module=repo status=ok row_id={} col_id={} value_len={}",
            stored.row_id,
            stored.col_id,
            stored.value.len()
        );
        Ok(stored)
    }

    fn list_cells(&self) -> RepoResult<Vec<Cell>> {
        self.query_cells(&format!("{CELL_SELECT_SQL} {CELL_ORDER_SQL};"), [])
    }

    fn list_row(&self, row_id: CellIndex) -> RepoResult<Vec<Cell>> {
        self.query_cells(
            &format!("{CELL_SELECT_SQL} WHERE row_id = ?1 {CELL_ORDER_SQL};"),
            [row_id],
        )
    }

    fn list_column(&self, col_id: CellIndex) -> RepoResult<Vec<Cell>> {
        self.query_cells(
            &format!("{CELL_SELECT_SQL} WHERE col_id = ?1 {CELL_ORDER_SQL};"),
            [col_id],
        )
    }

    fn delete_row(&self, row_id: CellIndex) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM cells WHERE row_id = ?1;", [row_id])?;
        debug!("event=cell_delete module=repo status=ok axis=row row_id={row_id} removed={removed}");
        Ok(removed)
    }

    fn delete_column(&self, col_id: CellIndex) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM cells WHERE col_id = ?1;", [col_id])?;
        debug!(
            "event=cell_delete module=repo status=ok axis=column col_id={col_id} removed={removed}"
        );
        Ok(removed)
    }
}

/// Verifies schema version and `cells` table shape on `conn`.
pub fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [CELLS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(CELLS_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({CELLS_TABLE});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    for &required in REQUIRED_CELL_COLUMNS {
        if !columns.iter().any(|name| name == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: CELLS_TABLE,
                column: required,
            });
        }
    }

    Ok(())
}

fn parse_cell_row(row: &Row<'_>) -> RepoResult<Cell> {
    let row_id = parse_index(row.get("row_id")?, "row_id")?;
    let col_id = parse_index(row.get("col_id")?, "col_id")?;
    Ok(Cell::new(row_id, col_id, row.get::<_, String>("value")?))
}

fn parse_index(value: i64, column: &str) -> RepoResult<CellIndex> {
    CellIndex::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid coordinate `{value}` in cells.{column}"))
    })
}
