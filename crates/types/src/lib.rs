//! Core types shared across the application.
//! This crate contains pure data types with no external dependencies.

/// Grid dimensions. The standard game is 4x4; the engine accepts other sizes
/// for testing, clamped to the supported range.
pub const STANDARD_GRID_SIZE: usize = 4;
pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 8;

/// Tile value that flips the session into the won state.
pub const WIN_VALUE: u32 = 2048;

/// Tiles placed on an empty grid at game start.
pub const START_TILES: usize = 2;

/// Percentage of spawns that produce a 4 instead of a 2.
pub const FOUR_SPAWN_PERCENT: u32 = 10;

/// Maximum number of leaderboard entries kept in the store.
pub const LEADERBOARD_CAP: usize = 10;

/// Key-value store keys. `bestScore` holds a plain integer string,
/// `leaderboard` holds a JSON array of entries.
pub const BEST_SCORE_KEY: &str = "bestScore";
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// Input pacing: queued moves held back while a move is in flight.
pub const MOVE_QUEUE_CAP: usize = 2;

/// A grid cell: `None` is empty, `Some(v)` holds a power-of-two tile value.
pub type Cell = Option<u32>;

/// The four slide directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Lines for this direction run along rows (true) or columns (false).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Lines are read from the far edge back toward index zero.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Player commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    NewGame,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(d) => d.as_str(),
            GameAction::NewGame => "newGame",
        }
    }
}

/// Result of applying one direction to a session.
///
/// `moved == false` means the turn was a no-op: nothing slid or merged,
/// no tile spawned, no state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_delta: u32,
    pub won: bool,
    pub game_over: bool,
}

/// A fact the engine wants persisted. The engine never performs I/O itself;
/// it queues facts and the store crate applies them asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFact {
    /// The session best score improved.
    BestScore(u32),
    /// The session ended; the final score is a leaderboard candidate.
    GameFinished { score: u32 },
}
