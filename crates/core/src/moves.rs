//! Move resolution - slide and merge along one direction.
//!
//! A move decomposes into N independent one-dimensional lines (rows for
//! left/right, columns for up/down). Each line is reduced by the same routine;
//! right and down reuse it by reading and writing positions in reverse order.
//!
//! Resolution never mutates the input grid and never spawns; the session layer
//! decides what to do with the result.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use tui_2048_types::{Cell, Direction, MAX_GRID_SIZE, WIN_VALUE};

/// Non-empty values of one line, ordered from the leading edge.
pub type LineValues = ArrayVec<u32, MAX_GRID_SIZE>;

/// Outcome of resolving one direction against a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMove {
    pub grid: Grid,
    /// At least one cell changed position or value.
    pub moved: bool,
    /// Sum of the values produced by merges (each merge of two `v` adds `2v`).
    pub score_delta: u32,
    /// A merge produced the winning tile during this move.
    pub reached_win: bool,
}

/// Map (line, pos) to grid coordinates for a direction.
///
/// `pos` 0 is the leading edge - the side tiles slide toward.
#[inline]
fn line_coord(dir: Direction, line: usize, pos: usize, n: usize) -> (usize, usize) {
    let along = if dir.is_reversed() { n - 1 - pos } else { pos };
    if dir.is_horizontal() {
        (line, along)
    } else {
        (along, line)
    }
}

/// Reduce one line in place: merge equal adjacent pairs once, then compact.
///
/// The input holds the line's non-empty values in leading-edge order. A value
/// produced by a merge is emitted and skipped over, so it can never merge
/// again within the same move (no chain-merging three equal tiles into one).
///
/// Returns the score delta and whether a merge produced the winning tile.
pub fn reduce_line(values: &mut LineValues) -> (u32, bool) {
    let mut out = LineValues::new();
    let mut score_delta = 0u32;
    let mut reached_win = false;

    let mut i = 0;
    while i < values.len() {
        if i + 1 < values.len() && values[i] == values[i + 1] {
            let merged = values[i] * 2;
            score_delta += merged;
            if merged == WIN_VALUE {
                reached_win = true;
            }
            out.push(merged);
            i += 2;
        } else {
            out.push(values[i]);
            i += 1;
        }
    }

    *values = out;
    (score_delta, reached_win)
}

/// Resolve a direction against a grid, producing the settled grid.
///
/// `moved` is derived by comparing each written cell against the pre-move
/// value at the same coordinate, i.e. by value sequence, so a line that
/// compacts onto itself does not count as a move.
pub fn resolve(grid: &Grid, dir: Direction) -> ResolvedMove {
    let n = grid.size();
    let mut next = grid.clone();
    let mut moved = false;
    let mut score_delta = 0u32;
    let mut reached_win = false;

    for line in 0..n {
        let mut values = LineValues::new();
        for pos in 0..n {
            let (row, col) = line_coord(dir, line, pos, n);
            if let Some(Some(v)) = grid.get(row, col) {
                values.push(v);
            }
        }

        let (delta, win) = reduce_line(&mut values);
        score_delta += delta;
        reached_win |= win;

        for pos in 0..n {
            let (row, col) = line_coord(dir, line, pos, n);
            let cell: Cell = values.get(pos).copied();
            if grid.get(row, col) != Some(cell) {
                moved = true;
            }
            next.set(row, col, cell);
        }
    }

    ResolvedMove {
        grid: next,
        moved,
        score_delta,
        reached_win,
    }
}
