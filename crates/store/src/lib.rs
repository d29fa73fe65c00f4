//! Persistence boundary for best score and leaderboard.
//!
//! The engine never performs I/O. It queues [`tui_2048_types::PersistFact`]s;
//! this crate owns the key-value store behind them and applies facts on a
//! background task so storage latency or failure can never stall or corrupt
//! gameplay.
//!
//! # Layout
//!
//! - [`kv`]: the `KeyValueStore` trait plus in-memory and JSON-file backends
//! - [`leaderboard`]: top-10 score list, descending, serde-encoded
//! - [`profile`]: load persisted state with fallback to defaults
//! - [`worker`]: tokio-backed fire-and-forget fact applier
//!
//! # Error policy
//!
//! Reads fall back to defaults (`bestScore = 0`, empty leaderboard) on
//! missing or malformed data. Write failures stay inside the worker; they are
//! never surfaced as gameplay errors.

pub mod kv;
pub mod leaderboard;
pub mod profile;
pub mod worker;

pub use tui_2048_types as types;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use profile::{load_profile, Profile};
pub use worker::{PersistenceWorker, StoreHandle};
