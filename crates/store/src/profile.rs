//! Persisted profile loading with fallback to defaults.

use crate::kv::KeyValueStore;
use crate::leaderboard::Leaderboard;
use tui_2048_types::{BEST_SCORE_KEY, LEADERBOARD_KEY};

/// Everything the game restores at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub best_score: u32,
    pub leaderboard: Leaderboard,
}

/// Load the profile. Never fails: an unreachable store, absent keys, or
/// malformed values all degrade to `bestScore = 0` and an empty leaderboard.
pub fn load_profile(store: &dyn KeyValueStore) -> Profile {
    let best_score = store
        .get(BEST_SCORE_KEY)
        .ok()
        .flatten()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0);

    let leaderboard = store
        .get(LEADERBOARD_KEY)
        .ok()
        .flatten()
        .map(|raw| Leaderboard::from_json(&raw))
        .unwrap_or_default();

    Profile {
        best_score,
        leaderboard,
    }
}
