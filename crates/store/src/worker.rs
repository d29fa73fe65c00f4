//! Persistence worker: applies engine facts on a background tokio task.
//!
//! Bridges the sync game loop with async storage. The loop calls
//! [`StoreHandle::submit`] fire-and-forget; the worker owns the store and
//! applies facts in order. A full queue drops the fact rather than blocking
//! the game, and apply failures never leave the worker.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::kv::KeyValueStore;
use crate::leaderboard::Leaderboard;
use tui_2048_types::{PersistFact, BEST_SCORE_KEY, LEADERBOARD_KEY};

/// Facts buffered between the game loop and the worker task.
const MAX_PENDING_FACTS: usize = 32;

/// Handle owned by the game loop.
pub struct StoreHandle {
    tx: mpsc::Sender<PersistFact>,
    rt: Runtime,
    join: JoinHandle<()>,
}

impl StoreHandle {
    /// Queue a fact without blocking. Dropped silently when the worker is
    /// behind or gone - persistence must never stall gameplay.
    pub fn submit(&self, fact: PersistFact) {
        let _ = self.tx.try_send(fact);
    }

    /// Close the queue and wait for already-queued facts to be applied.
    pub fn shutdown(self) {
        let Self { tx, rt, join } = self;
        drop(tx);
        let _ = rt.block_on(join);
    }
}

pub struct PersistenceWorker;

impl PersistenceWorker {
    /// Start a worker that owns `store` and writes under `username`.
    pub fn spawn<S>(store: S, username: String) -> Result<StoreHandle>
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = mpsc::channel(MAX_PENDING_FACTS);
        let rt = Runtime::new()?;
        let join = rt.spawn(async move {
            let _ = run_worker(store, rx, username).await;
        });
        Ok(StoreHandle { tx, rt, join })
    }
}

/// Drain the fact queue until all senders are gone, then hand the store back.
///
/// Exposed for tests that want to inspect the store afterwards.
pub async fn run_worker<S: KeyValueStore>(
    mut store: S,
    mut rx: mpsc::Receiver<PersistFact>,
    username: String,
) -> S {
    while let Some(fact) = rx.recv().await {
        // Failures stay inside the worker; gameplay never sees them.
        let _ = apply_fact(&mut store, &username, fact);
    }
    store
}

/// Apply one fact to the store.
pub fn apply_fact(store: &mut dyn KeyValueStore, username: &str, fact: PersistFact) -> Result<()> {
    match fact {
        PersistFact::BestScore(score) => {
            // Stored best is monotonic even if stale facts arrive reordered
            // across sessions.
            let stored = store
                .get(BEST_SCORE_KEY)?
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .unwrap_or(0);
            if score > stored {
                store.set(BEST_SCORE_KEY, &score.to_string())?;
            }
            Ok(())
        }
        PersistFact::GameFinished { score } => {
            let mut board = store
                .get(LEADERBOARD_KEY)?
                .map(|raw| Leaderboard::from_json(&raw))
                .unwrap_or_default();
            board.submit(username, score, now_unix());
            store.set(LEADERBOARD_KEY, &board.to_json())
        }
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
