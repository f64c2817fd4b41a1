use cellgrid_core::{Cell, CellCoord, DenseGrid, GridSession, DEFAULT_COLS, DEFAULT_ROWS};

fn at(row: u32, col: u32) -> CellCoord {
    CellCoord::new(row, col)
}

#[test]
fn snapshot_projects_into_default_grid() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![
        Cell::new(0, 0, "a"),
        Cell::new(2, 2, "c"),
        Cell::new(7, 7, "hidden"),
    ]);

    let grid = session.to_dense();
    assert_eq!(grid.row_count(), DEFAULT_ROWS);
    assert_eq!(grid.col_count(), DEFAULT_COLS);
    assert_eq!(grid.get(0, 0), Some("a"));
    assert_eq!(grid.get(2, 2), Some("c"));
    assert_eq!(
        grid,
        DenseGrid::from_cells(&[Cell::new(0, 0, "a"), Cell::new(2, 2, "c")], 3, 3)
    );
}

#[test]
fn edit_is_pending_until_acknowledged() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![Cell::new(0, 1, "old")]);

    let outgoing = session.edit(at(0, 1), "new");
    assert_eq!(outgoing, Cell::new(0, 1, "new"));
    assert!(session.is_pending(at(0, 1)));
    assert_eq!(session.value_at(at(0, 1)), "new");
    assert_eq!(session.server_value(at(0, 1)), Some("old"));

    session.acknowledge(&outgoing);
    assert!(!session.is_pending(at(0, 1)));
    assert_eq!(session.server_value(at(0, 1)), Some("new"));
}

#[test]
fn newer_edit_survives_ack_of_older_write() {
    let mut session = GridSession::default();

    let first = session.edit(at(1, 1), "h");
    session.edit(at(1, 1), "hi");
    session.acknowledge(&first);

    assert!(session.is_pending(at(1, 1)));
    assert_eq!(session.value_at(at(1, 1)), "hi");
    assert!(session.conflicts().is_empty());
}

#[test]
fn rejected_edit_reverts_to_server_value() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![Cell::new(2, 0, "kept")]);

    session.edit(at(2, 0), "lost");
    let dropped = session.reject(at(2, 0)).unwrap();

    assert_eq!(dropped.value, "lost");
    assert_eq!(dropped.base.as_deref(), Some("kept"));
    assert_eq!(session.value_at(at(2, 0)), "kept");
}

#[test]
fn refetch_exposes_conflicting_pending_edit() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![Cell::new(0, 0, "v1")]);
    session.edit(at(0, 0), "mine");
    session.edit(at(1, 1), "untouched");

    session.load_snapshot(vec![Cell::new(0, 0, "theirs")]);

    let conflicts = session.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].coord, at(0, 0));
    assert_eq!(conflicts[0].local, "mine");
    assert_eq!(conflicts[0].base.as_deref(), Some("v1"));
    assert_eq!(conflicts[0].server.as_deref(), Some("theirs"));
    assert_eq!(session.value_at(at(0, 0)), "mine");
    assert_eq!(session.pending_cells().len(), 2);
}

#[test]
fn append_row_and_column_seed_from_fetched_cells() {
    let mut session = GridSession::default();

    let row = session.append_row(vec![Cell::new(3, 0, "r"), Cell::new(0, 0, "ignored")]);
    assert_eq!(row, 3);
    let col = session.append_column(vec![Cell::new(1, 3, "c")]);
    assert_eq!(col, 3);

    let grid = session.to_dense();
    assert_eq!((grid.row_count(), grid.col_count()), (4, 4));
    assert_eq!(grid.get(3, 0), Some("r"));
    assert_eq!(grid.get(1, 3), Some("c"));
    assert_eq!(grid.get(0, 0), Some(""));
}

#[test]
fn row_delete_clears_in_place_and_trims_trailing_row() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![
        Cell::new(0, 0, "a"),
        Cell::new(1, 0, "b"),
        Cell::new(2, 0, "c"),
    ]);
    session.edit(at(1, 2), "pending");

    session.apply_row_delete(1);
    assert_eq!(session.row_count(), 3);
    assert_eq!(session.value_at(at(1, 0)), "");
    assert!(!session.is_pending(at(1, 2)));
    assert_eq!(session.value_at(at(2, 0)), "c");

    session.apply_row_delete(2);
    assert_eq!(session.row_count(), 2);
}

#[test]
fn column_delete_spans_rows_and_keeps_other_columns() {
    let mut session = GridSession::default();
    session.load_snapshot(vec![
        Cell::new(0, 0, "x"),
        Cell::new(0, 1, "y"),
        Cell::new(1, 1, "z"),
    ]);

    session.apply_column_delete(1);

    let grid = session.to_dense();
    assert_eq!(grid.get(0, 0), Some("x"));
    assert_eq!(grid.get(0, 1), Some(""));
    assert_eq!(grid.get(1, 1), Some(""));
    assert_eq!(session.col_count(), 3);
}
