//! Move gate: one command in flight at a time.
//!
//! The engine produces a settled snapshot per move, and the caller must not
//! issue a second move before the previous one has been rendered. The gate
//! enforces that: the first offered action passes through, later actions are
//! queued (bounded, newest kept) and released one per settle.

use arrayvec::ArrayVec;

use crate::types::{GameAction, MOVE_QUEUE_CAP};

/// Serializes player commands toward the engine.
#[derive(Debug, Clone, Default)]
pub struct MoveGate {
    in_flight: bool,
    queued: ArrayVec<GameAction, MOVE_QUEUE_CAP>,
}

impl MoveGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a player action. Returns the action when the gate is open;
    /// otherwise queues it (replacing the newest queued entry when full) and
    /// returns None.
    pub fn offer(&mut self, action: GameAction) -> Option<GameAction> {
        if !self.in_flight {
            self.in_flight = true;
            return Some(action);
        }
        if self.queued.try_push(action).is_err() {
            // Bounded queue: a burst of inputs keeps only the latest intent.
            let last = self.queued.len() - 1;
            self.queued[last] = action;
        }
        None
    }

    /// Mark the in-flight move settled (its snapshot has been rendered).
    /// Returns the next queued action, keeping the gate closed for it;
    /// returns None and opens the gate when the queue is empty.
    pub fn settle(&mut self) -> Option<GameAction> {
        if !self.in_flight {
            return None;
        }
        if self.queued.is_empty() {
            self.in_flight = false;
            None
        } else {
            Some(self.queued.remove(0))
        }
    }

    pub fn is_open(&self) -> bool {
        !self.in_flight
    }

    /// Drop any queued input and open the gate, e.g. on new game.
    pub fn reset(&mut self) {
        self.in_flight = false;
        self.queued.clear();
    }
}
