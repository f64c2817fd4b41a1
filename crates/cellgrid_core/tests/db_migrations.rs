use cellgrid_core::db::migrations::{apply_migrations, current_version, latest_version};
use cellgrid_core::db::{open_db, open_db_in_memory, DbError, IN_MEMORY_PATH};
use cellgrid_core::{Cell, CellRepository, SqliteCellRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "cells");
    assert_index_exists(&conn, "idx_cells_row_col");
}

#[test]
fn memory_path_opens_independent_stores() {
    let first = open_db(IN_MEMORY_PATH).unwrap();
    let second = open_db(IN_MEMORY_PATH).unwrap();

    SqliteCellRepository::try_new(&first)
        .unwrap()
        .upsert_cell(&Cell::new(0, 0, "only here"))
        .unwrap();

    let other = SqliteCellRepository::try_new(&second).unwrap();
    assert!(other.list_cells().unwrap().is_empty());
}

#[test]
fn reopening_file_database_keeps_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cells.sqlite3");

    let conn_first = open_db(&path).unwrap();
    SqliteCellRepository::try_new(&conn_first)
        .unwrap()
        .upsert_cell(&Cell::new(1, 2, "persisted"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(current_version(&conn_second).unwrap(), latest_version());
    let cells = SqliteCellRepository::try_new(&conn_second)
        .unwrap()
        .list_cells()
        .unwrap();
    assert_eq!(cells, vec![Cell::new(1, 2, "persisted")]);
}

#[test]
fn applying_migrations_twice_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_table_exists(conn: &Connection, name: &str) {
    assert!(schema_object_exists(conn, "table", name), "table {name} does not exist");
}

fn assert_index_exists(conn: &Connection, name: &str) {
    assert!(schema_object_exists(conn, "index", name), "index {name} does not exist");
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
