//! Terminal shell: the select menu, the frame loop, and score write-through.
//!
//! The loop owns every piece of mutable state. Each pass draws the current
//! screen, polls for one key event, then feeds elapsed wall time to the live
//! game. Games never block and never touch the terminal or the score file.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::constants::POLL_INTERVAL_MS;
use crate::games::{
    flappy, minesweeper, platformer, snake, tetris, ActiveGame, BestTimes, FlappyGame,
    FlappyInput, GameId, MinesweeperDifficulty, MinesweeperGame, MinesweeperInput,
    PlatformerGame, SnakeGame, SnakeInput, TetrisAction, TetrisGame,
};
use crate::input::{self, KeyTracker};
use crate::scheduler::FrameClock;
use crate::scores::{
    self, ScoreStore, KEY_FLAPPY_HIGH_SCORE, KEY_MINESWEEPER_BEST_TIMES,
    KEY_MINESWEEPER_PREFERRED_DIFFICULTY, KEY_PLATFORMER_HIGH_SCORE, KEY_PORTAL_HIGH_SCORE,
    KEY_TETRIS_HIGH_SCORE,
};
use crate::ui;

/// Best results shown on the menu, loaded from the score store.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuBests {
    pub minesweeper: BestTimes,
    pub snake: u32,
    pub tetris: u32,
    pub flappy: u32,
    pub platformer: u32,
}

impl MenuBests {
    fn from_store(store: &dyn ScoreStore) -> Self {
        Self {
            minesweeper: scores::get(store, KEY_MINESWEEPER_BEST_TIMES).unwrap_or_default(),
            snake: scores::get(store, KEY_PORTAL_HIGH_SCORE).unwrap_or(0),
            tetris: scores::get(store, KEY_TETRIS_HIGH_SCORE).unwrap_or(0),
            flappy: scores::get(store, KEY_FLAPPY_HIGH_SCORE).unwrap_or(0),
            platformer: scores::get(store, KEY_PLATFORMER_HIGH_SCORE).unwrap_or(0),
        }
    }
}

/// Select-menu state.
pub struct MenuState {
    pub selected: usize,
    pub difficulty: MinesweeperDifficulty,
    pub bests: MenuBests,
}

impl MenuState {
    fn from_store(store: &dyn ScoreStore) -> Self {
        Self {
            selected: 0,
            difficulty: scores::get(store, KEY_MINESWEEPER_PREFERRED_DIFFICULTY)
                .unwrap_or(MinesweeperDifficulty::Easy),
            bests: MenuBests::from_store(store),
        }
    }
}

/// Everything the draw pass needs. `active == None` means the menu is up.
pub struct App {
    pub menu: MenuState,
    pub active: Option<ActiveGame>,
    /// Whether the live game's terminal result has already been written
    /// through. Restarting flips it back.
    best_written: bool,
}

impl App {
    pub fn new(store: &dyn ScoreStore) -> Self {
        Self {
            menu: MenuState::from_store(store),
            active: None,
            best_written: false,
        }
    }
}

/// What a key event did to the shell.
enum InputResult {
    Continue,
    /// Moved between menu and a game; held keys and the frame clock reset.
    ScreenChanged,
    Quit,
}

/// Run the cabinet until the player quits.
pub fn run() -> io::Result<()> {
    let mut store = scores::FileStore::open()?;
    let mut app = App::new(&store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &mut store);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye! Your best scores are saved.");

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut dyn ScoreStore,
) -> io::Result<()> {
    let mut keys = KeyTracker::new();
    let mut clock = FrameClock::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // One event per pass keeps input latency under a frame
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                let fresh = keys.record(key);
                match handle_key(app, store, key.code, fresh)? {
                    InputResult::Continue => {}
                    InputResult::ScreenChanged => {
                        keys.clear();
                        clock.restart();
                    }
                    InputResult::Quit => return Ok(()),
                }
            }
        }

        let dt_ms = clock.tick();
        advance(app, store, dt_ms, &keys)?;
    }
}

/// Route a key press to the menu or the live game.
fn handle_key(
    app: &mut App,
    store: &mut dyn ScoreStore,
    code: KeyCode,
    fresh: bool,
) -> io::Result<InputResult> {
    let Some(game) = app.active.as_mut() else {
        return handle_menu_key(app, store, code);
    };

    // Leaving a game always works, even mid-run. Unfinished progress is
    // dropped; bests were written through at the terminal transition.
    if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        app.active = None;
        app.best_written = false;
        app.menu.bests = MenuBests::from_store(store);
        return Ok(InputResult::ScreenChanged);
    }

    match game {
        ActiveGame::Minesweeper(g) => {
            let input = input::minesweeper_input(code);
            let one_shot = matches!(
                input,
                MinesweeperInput::TogglePause | MinesweeperInput::Restart
            );
            if !one_shot || fresh {
                minesweeper::process_input(g, input, &mut rand::thread_rng());
            }
        }
        ActiveGame::Snake(g) => {
            let input = input::snake_input(code);
            let one_shot = matches!(input, SnakeInput::TogglePause | SnakeInput::Restart);
            if !one_shot || fresh {
                snake::process_input(g, input, &mut rand::thread_rng());
            }
        }
        ActiveGame::Tetris(g) => {
            if let Some(action) = input::tetris_action(code) {
                let one_shot =
                    matches!(action, TetrisAction::TogglePause | TetrisAction::Restart);
                if !one_shot || fresh {
                    tetris::apply_action(g, action, &mut rand::thread_rng());
                }
            }
        }
        ActiveGame::Flappy(g) => {
            let input = input::flappy_input(code);
            let one_shot = matches!(input, FlappyInput::TogglePause | FlappyInput::Restart);
            if !one_shot || fresh {
                flappy::process_input(g, input);
            }
        }
        ActiveGame::Platformer(g) => {
            // Movement is held state, read each frame; only one-shots go
            // through here
            if fresh {
                platformer::process_input(g, input::platformer_input(code));
            }
        }
    }

    Ok(InputResult::Continue)
}

fn handle_menu_key(
    app: &mut App,
    store: &mut dyn ScoreStore,
    code: KeyCode,
) -> io::Result<InputResult> {
    let count = GameId::ALL.len();

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(InputResult::Quit),
        KeyCode::Up | KeyCode::Char('w') => {
            app.menu.selected = (app.menu.selected + count - 1) % count;
        }
        KeyCode::Down | KeyCode::Char('s') => {
            app.menu.selected = (app.menu.selected + 1) % count;
        }
        KeyCode::Left | KeyCode::Char('a') => {
            if GameId::ALL[app.menu.selected] == GameId::Minesweeper {
                cycle_difficulty(&mut app.menu, -1);
            }
        }
        KeyCode::Right | KeyCode::Char('d') => {
            if GameId::ALL[app.menu.selected] == GameId::Minesweeper {
                cycle_difficulty(&mut app.menu, 1);
            }
        }
        KeyCode::Enter => {
            launch(app, store)?;
            return Ok(InputResult::ScreenChanged);
        }
        _ => {}
    }

    Ok(InputResult::Continue)
}

fn cycle_difficulty(menu: &mut MenuState, delta: i32) {
    let all = MinesweeperDifficulty::ALL;
    let index = all
        .iter()
        .position(|d| *d == menu.difficulty)
        .unwrap_or(0) as i32;
    let next = (index + delta).rem_euclid(all.len() as i32) as usize;
    menu.difficulty = all[next];
}

/// Start the selected game with its persisted best loaded in.
fn launch(app: &mut App, store: &mut dyn ScoreStore) -> io::Result<()> {
    let id = GameId::ALL[app.menu.selected];
    let mut rng = rand::thread_rng();

    app.best_written = false;
    app.active = Some(match id {
        GameId::Minesweeper => {
            // Starting a board also pins the difficulty choice for next time
            scores::set(store, KEY_MINESWEEPER_PREFERRED_DIFFICULTY, &app.menu.difficulty)?;
            let best_times = scores::get(store, KEY_MINESWEEPER_BEST_TIMES).unwrap_or_default();
            ActiveGame::Minesweeper(MinesweeperGame::new(app.menu.difficulty, best_times))
        }
        GameId::Snake => {
            let high = scores::get(store, KEY_PORTAL_HIGH_SCORE).unwrap_or(0);
            ActiveGame::Snake(SnakeGame::new(high, &mut rng))
        }
        GameId::Tetris => {
            let high = scores::get(store, KEY_TETRIS_HIGH_SCORE).unwrap_or(0);
            ActiveGame::Tetris(TetrisGame::new(high, &mut rng))
        }
        GameId::Flappy => {
            let high = scores::get(store, KEY_FLAPPY_HIGH_SCORE).unwrap_or(0);
            ActiveGame::Flappy(FlappyGame::new(high))
        }
        GameId::Platformer => {
            let high = scores::get(store, KEY_PLATFORMER_HIGH_SCORE).unwrap_or(0);
            ActiveGame::Platformer(Box::new(PlatformerGame::new(high)))
        }
    });

    Ok(())
}

/// Feed elapsed time to the live game, then write its best through exactly
/// once when it reaches a terminal state.
fn advance(app: &mut App, store: &mut dyn ScoreStore, dt_ms: u64, keys: &KeyTracker) -> io::Result<()> {
    let Some(game) = app.active.as_mut() else {
        return Ok(());
    };

    let mut rng = rand::thread_rng();
    match game {
        ActiveGame::Minesweeper(g) => {
            minesweeper::tick_minesweeper(g, dt_ms);
        }
        ActiveGame::Snake(g) => snake::tick_snake(g, dt_ms, &mut rng),
        ActiveGame::Tetris(g) => tetris::tick_tetris(g, dt_ms, &mut rng),
        ActiveGame::Flappy(g) => flappy::tick_flappy(g, dt_ms, &mut rng),
        ActiveGame::Platformer(g) => {
            let buttons = input::platformer_buttons(keys);
            platformer::tick_platformer(g, dt_ms, buttons);
        }
    }

    if game.is_terminal() {
        if !app.best_written {
            write_best(game, store)?;
            app.best_written = true;
        }
    } else {
        app.best_written = false;
    }

    Ok(())
}

/// Persist the live game's best under its legacy key.
fn write_best(game: &ActiveGame, store: &mut dyn ScoreStore) -> io::Result<()> {
    match game {
        ActiveGame::Minesweeper(g) => {
            scores::set(store, KEY_MINESWEEPER_BEST_TIMES, &g.best_times)
        }
        ActiveGame::Snake(g) => scores::set(store, KEY_PORTAL_HIGH_SCORE, &g.high_score),
        ActiveGame::Tetris(g) => scores::set(store, KEY_TETRIS_HIGH_SCORE, &g.high_score),
        ActiveGame::Flappy(g) => scores::set(store, KEY_FLAPPY_HIGH_SCORE, &g.high_score),
        ActiveGame::Platformer(g) => scores::set(store, KEY_PLATFORMER_HIGH_SCORE, &g.high_score),
    }
}
