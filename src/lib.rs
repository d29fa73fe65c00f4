//! TUI 2048 (workspace facade crate).
//!
//! This package keeps the `tui_2048::{core,input,store,term,types}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
