//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). Persistence runs on a background worker;
//! the game loop itself is synchronous.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_2048::core::{GameSnapshot, GameState};
use tui_2048::input::{handle_key_event, should_quit, MoveGate};
use tui_2048::store::{load_profile, JsonFileStore, PersistenceWorker, StoreHandle};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{GameAction, STANDARD_GRID_SIZE};

/// Poll timeout between input checks while idle.
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let store = JsonFileStore::open(store_path());
    let profile = load_profile(&store);
    let handle = PersistenceWorker::spawn(store, username())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, profile.best_score, &handle);

    // Always try to restore terminal state.
    let _ = term.exit();
    handle.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, best_score: u32, handle: &StoreHandle) -> Result<()> {
    let mut game = GameState::new(STANDARD_GRID_SIZE, entropy_seed()).with_best_score(best_score);
    let view = GameView::default();
    let mut gate = MoveGate::new();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // The frame is on screen: the in-flight move has settled. Release
        // the next queued action, or open the gate.
        if let Some(action) = gate.settle() {
            dispatch(&mut game, &mut gate, action);
            flush_facts(&mut game, handle);
            continue;
        }

        if event::poll(Duration::from_millis(IDLE_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(action) = gate.offer(action) {
                            dispatch(&mut game, &mut gate, action);
                            flush_facts(&mut game, handle);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}

fn dispatch(game: &mut GameState, gate: &mut MoveGate, action: GameAction) {
    match action {
        GameAction::Move(dir) => {
            game.apply_move(dir);
        }
        GameAction::NewGame => {
            game.new_game();
            gate.reset();
        }
    }
}

fn flush_facts(game: &mut GameState, handle: &StoreHandle) {
    for fact in game.take_persist_facts() {
        handle.submit(fact);
    }
}

/// State file: `$TUI2048_STATE` when set, otherwise `~/.tui-2048.json`.
fn store_path() -> PathBuf {
    if let Ok(path) = std::env::var("TUI2048_STATE") {
        return PathBuf::from(path);
    }
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default();
    path.push(".tui-2048.json");
    path
}

fn username() -> String {
    std::env::var("USER").unwrap_or_else(|_| "player".to_string())
}

fn entropy_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}
