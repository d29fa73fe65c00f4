//! Leaderboard: bounded top-N score list.
//!
//! The engine only produces (username, score) pairs; ordering and capping
//! happen here. Entries are kept descending by score, ties resolved by the
//! earlier timestamp, capped to [`tui_2048_types::LEADERBOARD_CAP`].

use serde::{Deserialize, Serialize};

use tui_2048_types::LEADERBOARD_CAP;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from stored JSON. Malformed input falls back to an empty list.
    pub fn from_json(raw: &str) -> Self {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(raw).unwrap_or_default();
        let mut board = Self { entries };
        board.normalize();
        board
    }

    pub fn to_json(&self) -> String {
        // Serializing a plain Vec of plain fields cannot fail.
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Submit a finished game. Returns the entry's rank (0-based) when it
    /// made the list, None when it fell below the cap.
    pub fn submit(&mut self, username: &str, score: u32, timestamp: u64) -> Option<usize> {
        self.entries.push(LeaderboardEntry {
            username: username.to_string(),
            score,
            timestamp,
        });
        self.normalize();
        self.entries
            .iter()
            .position(|e| e.username == username && e.score == score && e.timestamp == timestamp)
    }

    fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
        self.entries.truncate(LEADERBOARD_CAP);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
