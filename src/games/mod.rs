//! The five cabinet games: Minesweeper, Snake, Tetris, Flappy Bird, and a
//! side-scrolling platformer.
//!
//! Every game follows the same shape: `types.rs` holds the state snapshot and
//! tuning constants, `logic.rs` holds the input enum and the tick function.
//! The event loop owns the state and drives it; scenes only read it.

pub mod flappy;
pub mod minesweeper;
pub mod platformer;
pub mod snake;
pub mod tetris;

pub use flappy::{FlappyGame, FlappyInput, FlappyStatus, GameOverReason, Pipe};
pub use minesweeper::{
    BestTimes, Cell, MinesweeperDifficulty, MinesweeperGame, MinesweeperInput, MinesweeperStatus,
};
pub use platformer::{
    AnimationState, Buttons, PlatformerGame, PlatformerInput, PlatformerStatus,
};
pub use snake::{Direction, Position, SnakeGame, SnakeInput, SnakeStatus};
pub use tetris::{Piece, TetrisAction, TetrisGame};

/// Menu identity for each cabinet game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameId {
    Minesweeper,
    Snake,
    Tetris,
    Flappy,
    Platformer,
}

impl GameId {
    pub const ALL: [GameId; 5] = [
        GameId::Minesweeper,
        GameId::Snake,
        GameId::Tetris,
        GameId::Flappy,
        GameId::Platformer,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Minesweeper => "Minesweeper",
            Self::Snake => "Snake",
            Self::Tetris => "Tetris",
            Self::Flappy => "Flappy Bird",
            Self::Platformer => "Platformer",
        }
    }
}

/// The game currently on screen. Exactly one is live at a time; leaving a
/// game drops its state, which is what tears its scheduling down.
pub enum ActiveGame {
    Minesweeper(MinesweeperGame),
    Snake(SnakeGame),
    Tetris(TetrisGame),
    Flappy(FlappyGame),
    Platformer(Box<PlatformerGame>),
}

impl ActiveGame {
    pub fn id(&self) -> GameId {
        match self {
            Self::Minesweeper(_) => GameId::Minesweeper,
            Self::Snake(_) => GameId::Snake,
            Self::Tetris(_) => GameId::Tetris,
            Self::Flappy(_) => GameId::Flappy,
            Self::Platformer(_) => GameId::Platformer,
        }
    }

    /// True once the session has reached a terminal state (won or lost).
    /// The event loop writes best scores through exactly once per terminal
    /// transition.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Minesweeper(g) => matches!(
                g.status,
                MinesweeperStatus::GameOver | MinesweeperStatus::Won
            ),
            Self::Snake(g) => g.status == SnakeStatus::GameOver,
            Self::Tetris(g) => g.game_over,
            Self::Flappy(g) => g.status == FlappyStatus::GameOver,
            Self::Platformer(g) => matches!(
                g.status,
                PlatformerStatus::GameOver | PlatformerStatus::Victory
            ),
        }
    }
}
