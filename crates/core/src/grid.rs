//! Grid module - manages the tile board.
//!
//! The grid is an N x N matrix where each cell is empty or holds a
//! power-of-two tile value. Storage is a flat row-major buffer allocated once
//! per game. Coordinates: (row, col) with row 0 at the top, col 0 at the left.
//!
//! The grid is the authoritative board state. There is no separate tile-object
//! layer; move legality, scoring, and terminal detection all read this matrix.

use tui_2048_types::{Cell, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// The game grid - N x N cells using flat row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid. `size` must already be within the supported
    /// range; the session constructor clamps before calling this.
    pub fn new(size: usize) -> Self {
        debug_assert!((MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size));
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Calculate flat index from (row, col) coordinates.
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at (row, col). Returns `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Coordinates of the k-th empty cell in row-major order.
    ///
    /// Spawning selects uniformly among empty cells by drawing k first, so no
    /// position list needs to be collected.
    pub fn nth_empty(&self, mut k: usize) -> Option<(usize, usize)> {
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.is_none() {
                if k == 0 {
                    return Some((idx / self.size, idx % self.size));
                }
                k -= 1;
            }
        }
        None
    }

    /// Whether any legal move remains.
    ///
    /// The game is not over if at least one cell is empty or any two
    /// orthogonally adjacent cells hold equal values. Checking right and down
    /// neighbors covers every edge-sharing pair exactly once.
    pub fn has_moves(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let cell = self.cells[row * self.size + col];
                let Some(value) = cell else {
                    return true;
                };
                if col + 1 < self.size && self.cells[row * self.size + col + 1] == Some(value) {
                    return true;
                }
                if row + 1 < self.size && self.cells[(row + 1) * self.size + col] == Some(value) {
                    return true;
                }
            }
        }
        false
    }

    /// Sum of all tile values. Merges conserve this; only spawns increase it.
    pub fn total_value(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// Largest tile on the board, or 0 when empty.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Get a reference to the internal cell buffer.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write tile values row-major into `out`, 0 for empty cells.
    ///
    /// Reuses the caller's allocation across snapshots.
    pub fn write_values(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.unwrap_or(0)));
    }

    /// Clear the entire grid.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a grid from row-major values, 0 meaning empty.
    ///
    /// Panics if the slice length does not match `size * size`. Intended for
    /// tests and benches.
    pub fn from_values(size: usize, values: &[u32]) -> Self {
        assert_eq!(values.len(), size * size);
        Self {
            size,
            cells: values
                .iter()
                .map(|&v| if v == 0 { None } else { Some(v) })
                .collect(),
        }
    }
}
