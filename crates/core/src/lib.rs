//! Core game engine - pure, deterministic, and testable.
//!
//! This crate contains all the 2048 rules and state management. It has
//! **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: the same seed replays an identical game
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: runs in any environment (terminal, headless, embedded host)
//!
//! # Module structure
//!
//! - [`grid`]: N x N tile matrix with empty-cell queries and terminal
//!   detection
//! - [`moves`]: slide-and-merge line reduction for all four directions
//! - [`game`]: session orchestration - moves, spawning, scoring, win and
//!   game-over flags, persist-fact emission
//! - [`rng`]: seedable LCG so randomness is injected state, never global
//! - [`snapshot`]: settled-state export for the presentation layer
//!
//! # Game rules
//!
//! Classic 2048: tiles slide to the chosen edge, equal adjacent tiles merge
//! once per move (no re-merge within a move), every legal move spawns one
//! tile (2 at 90%, 4 at 10%) on a uniformly random empty cell, and the game
//! ends when the board is full with no orthogonally adjacent equal pair.
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::Direction;
//!
//! let mut game = GameState::new(4, 12345);
//! let outcome = game.apply_move(Direction::Left);
//!
//! // A settled snapshot is the only externally observable state.
//! let snap = game.snapshot();
//! assert_eq!(snap.game_over, outcome.game_over);
//! ```

pub mod game;
pub mod grid;
pub mod moves;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience.
pub use game::GameState;
pub use grid::Grid;
pub use moves::{reduce_line, resolve, ResolvedMove};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
