//! Settled-state export consumed by the presentation layer.
//!
//! A snapshot is the only state observable between moves: the grid after the
//! move's slide, merge, and spawn steps have all completed.

/// Snapshot of one settled game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Side length of the grid.
    pub size: usize,
    /// Tile values row-major, 0 for empty cells (`size * size` entries).
    pub grid: Vec<u32>,
    pub score: u32,
    pub best_score: u32,
    pub won: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u32,
    pub move_count: u32,
    /// Tile placed by the most recent spawn (row, col, value).
    pub last_spawn: Option<(usize, usize, u32)>,
}

impl GameSnapshot {
    /// Tile value at (row, col), 0 for empty. Returns 0 out of bounds, even
    /// for a snapshot whose buffer is shorter than `size * size`.
    pub fn value_at(&self, row: usize, col: usize) -> u32 {
        if row >= self.size || col >= self.size {
            return 0;
        }
        self.grid.get(row * self.size + col).copied().unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn clear(&mut self) {
        self.size = 0;
        self.grid.clear();
        self.score = 0;
        self.best_score = 0;
        self.won = false;
        self.game_over = false;
        self.episode_id = 0;
        self.seed = 0;
        self.move_count = 0;
        self.last_spawn = None;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            size: 0,
            grid: Vec::new(),
            score: 0,
            best_score: 0,
            won: false,
            game_over: false,
            episode_id: 0,
            seed: 0,
            move_count: 0,
            last_spawn: None,
        }
    }
}
