use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::constants::HOLD_EXPIRY_MS;
use crate::games::{Buttons, FlappyInput, MinesweeperInput, PlatformerInput, SnakeInput, TetrisAction};

/// Tracks which keys are currently held.
///
/// Most terminals never deliver release events, so a key counts as held
/// while its latest press is younger than [`HOLD_EXPIRY_MS`]; autorepeat
/// keeps refreshing the entry. [`KeyTracker::record`] reports whether an
/// event is a fresh physical press, which is what one-shot game intents
/// key off. A re-press inside the expiry window after a silent release is
/// folded into the previous hold.
#[derive(Default)]
pub struct KeyTracker {
    pressed: HashMap<KeyCode, Instant>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            pressed: HashMap::new(),
        }
    }

    /// Record a key event. Returns true for a fresh press, false for
    /// autorepeat and releases.
    pub fn record(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            self.pressed.remove(&key.code);
            return false;
        }
        let now = Instant::now();
        let already_down = self
            .pressed
            .get(&key.code)
            .map_or(false, |last| now.duration_since(*last) < Duration::from_millis(HOLD_EXPIRY_MS));
        self.pressed.insert(key.code, now);
        key.kind == KeyEventKind::Press && !already_down
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.pressed
            .get(&code)
            .map_or(false, |last| last.elapsed() < Duration::from_millis(HOLD_EXPIRY_MS))
    }

    /// Drop all held state, e.g. when switching screens.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Map a key to a minesweeper intent.
pub fn minesweeper_input(code: KeyCode) -> MinesweeperInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') => MinesweeperInput::Up,
        KeyCode::Down | KeyCode::Char('s') => MinesweeperInput::Down,
        KeyCode::Left | KeyCode::Char('a') => MinesweeperInput::Left,
        KeyCode::Right | KeyCode::Char('d') => MinesweeperInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => MinesweeperInput::Reveal,
        KeyCode::Char('f') => MinesweeperInput::Flag,
        KeyCode::Char('p') => MinesweeperInput::TogglePause,
        KeyCode::Char('r') => MinesweeperInput::Restart,
        _ => MinesweeperInput::Other,
    }
}

/// Map a key to a snake intent.
pub fn snake_input(code: KeyCode) -> SnakeInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') => SnakeInput::Up,
        KeyCode::Down | KeyCode::Char('s') => SnakeInput::Down,
        KeyCode::Left | KeyCode::Char('a') => SnakeInput::Left,
        KeyCode::Right | KeyCode::Char('d') => SnakeInput::Right,
        KeyCode::Char('p') => SnakeInput::TogglePause,
        KeyCode::Char('r') => SnakeInput::Restart,
        _ => SnakeInput::Other,
    }
}

/// Map a key to a tetris action, if it has one.
pub fn tetris_action(code: KeyCode) -> Option<TetrisAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(TetrisAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(TetrisAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Some(TetrisAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') => Some(TetrisAction::Rotate),
        KeyCode::Enter | KeyCode::Char(' ') => Some(TetrisAction::HardDrop),
        KeyCode::Char('p') => Some(TetrisAction::TogglePause),
        KeyCode::Char('r') => Some(TetrisAction::Restart),
        _ => None,
    }
}

/// Map a key to a flappy intent.
pub fn flappy_input(code: KeyCode) -> FlappyInput {
    match code {
        KeyCode::Up | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('w') => FlappyInput::Flap,
        KeyCode::Char('p') => FlappyInput::TogglePause,
        KeyCode::Char('r') => FlappyInput::Restart,
        _ => FlappyInput::Other,
    }
}

/// Map a key to a platformer one-shot intent. Movement is held state and
/// goes through [`platformer_buttons`] instead.
pub fn platformer_input(code: KeyCode) -> PlatformerInput {
    match code {
        KeyCode::Enter => PlatformerInput::Start,
        KeyCode::Char('p') => PlatformerInput::TogglePause,
        KeyCode::Char('r') => PlatformerInput::Restart,
        _ => PlatformerInput::Other,
    }
}

/// Snapshot the held movement keys for the platformer.
pub fn platformer_buttons(keys: &KeyTracker) -> Buttons {
    Buttons {
        left: keys.is_held(KeyCode::Left) || keys.is_held(KeyCode::Char('a')),
        right: keys.is_held(KeyCode::Right) || keys.is_held(KeyCode::Char('d')),
        jump: keys.is_held(KeyCode::Up)
            || keys.is_held(KeyCode::Char('w'))
            || keys.is_held(KeyCode::Char(' ')),
        run: keys.is_held(KeyCode::Char('x')) || keys.is_held(KeyCode::Char('X')),
        duck: keys.is_held(KeyCode::Down) || keys.is_held(KeyCode::Char('s')),
    }
}
