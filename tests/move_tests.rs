//! Move resolution semantics across the public API.

use tui_2048::core::{resolve, Grid};
use tui_2048::types::Direction;

fn row_values(grid: &Grid, row: usize) -> Vec<u32> {
    (0..4)
        .map(|col| grid.get(row, col).flatten().unwrap_or(0))
        .collect()
}

#[test]
fn left_move_merges_leading_pair() {
    let grid = Grid::from_values(4, &[2, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Left);

    assert!(resolved.moved);
    assert_eq!(resolved.score_delta, 4);
    assert_eq!(row_values(&resolved.grid, 0), vec![4, 4, 0, 0]);
}

#[test]
fn right_move_compacts_toward_trailing_edge() {
    let grid = Grid::from_values(4, &[2, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Right);

    assert!(resolved.moved);
    assert_eq!(resolved.score_delta, 4);
    assert_eq!(row_values(&resolved.grid, 0), vec![0, 0, 4, 4]);
}

#[test]
fn four_equal_tiles_merge_pairwise() {
    let grid = Grid::from_values(4, &[2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Left);

    assert_eq!(resolved.score_delta, 8);
    assert_eq!(row_values(&resolved.grid, 0), vec![4, 4, 0, 0]);
}

#[test]
fn merged_tile_does_not_merge_again_in_same_move() {
    // [4, 2, 2] -> [4, 4], never [8].
    let grid = Grid::from_values(4, &[4, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Left);

    assert_eq!(resolved.score_delta, 4);
    assert_eq!(row_values(&resolved.grid, 0), vec![4, 4, 0, 0]);
}

#[test]
fn vertical_moves_operate_on_columns() {
    let grid = Grid::from_values(4, &[2, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0]);

    let up = resolve(&grid, Direction::Up);
    assert_eq!(up.score_delta, 4);
    assert_eq!(up.grid.get(0, 0).flatten(), Some(4));
    assert_eq!(up.grid.get(1, 0).flatten(), Some(4));
    assert_eq!(up.grid.get(2, 0).flatten(), None);

    let down = resolve(&grid, Direction::Down);
    assert_eq!(down.score_delta, 4);
    assert_eq!(down.grid.get(3, 0).flatten(), Some(4));
    assert_eq!(down.grid.get(2, 0).flatten(), Some(4));
}

#[test]
fn settled_board_reports_no_movement() {
    let grid = Grid::from_values(4, &[2, 4, 8, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Left);

    assert!(!resolved.moved);
    assert_eq!(resolved.score_delta, 0);
}

#[test]
fn resolution_conserves_total_tile_value() {
    let grid = Grid::from_values(4, &[2, 2, 4, 8, 4, 4, 8, 8, 2, 0, 2, 16, 0, 2, 0, 4]);
    let total = grid.total_value();

    for dir in Direction::ALL {
        assert_eq!(resolve(&grid, dir).grid.total_value(), total);
    }
}

#[test]
fn reaching_2048_is_reported() {
    let grid = Grid::from_values(4, &[1024, 1024, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let resolved = resolve(&grid, Direction::Left);

    assert!(resolved.reached_win);
    assert_eq!(resolved.score_delta, 2048);
}
