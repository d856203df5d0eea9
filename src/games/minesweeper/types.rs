//! Minesweeper data structures.

use crate::scheduler::Cadence;
use serde::{Deserialize, Serialize};

/// Clock step: the timer advances once per second of play.
pub const TIMER_INTERVAL_MS: u64 = 1000;

/// Board presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinesweeperDifficulty {
    Easy,
    Medium,
    Hard,
}

impl MinesweeperDifficulty {
    pub const ALL: [MinesweeperDifficulty; 3] = [
        MinesweeperDifficulty::Easy,
        MinesweeperDifficulty::Medium,
        MinesweeperDifficulty::Hard,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(MinesweeperDifficulty::Easy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Lowercase form used in the persisted preferred-difficulty value.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Grid height (number of rows).
    pub fn rows(&self) -> usize {
        match self {
            Self::Easy => 9,
            Self::Medium => 16,
            Self::Hard => 16,
        }
    }

    /// Grid width (number of columns).
    pub fn cols(&self) -> usize {
        match self {
            Self::Easy => 9,
            Self::Medium => 16,
            Self::Hard => 30,
        }
    }

    pub fn mines(&self) -> u16 {
        match self {
            Self::Easy => 10,
            Self::Medium => 40,
            Self::Hard => 99,
        }
    }
}

/// Session state machine. One-directional except `Playing` ⇄ `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
    Won,
}

/// A single board cell. `revealed` and `flagged` are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Count of mines in the 8-neighborhood (0-8). Meaningless on mine cells.
    pub adjacent_mines: u8,
}

/// Persisted best completion times in seconds, one slot per difficulty.
/// Serialized under the `minesweeper_high_scores` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimes {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl BestTimes {
    pub fn get(&self, difficulty: MinesweeperDifficulty) -> u32 {
        match difficulty {
            MinesweeperDifficulty::Easy => self.easy,
            MinesweeperDifficulty::Medium => self.medium,
            MinesweeperDifficulty::Hard => self.hard,
        }
    }

    pub fn set(&mut self, difficulty: MinesweeperDifficulty, seconds: u32) {
        match difficulty {
            MinesweeperDifficulty::Easy => self.easy = seconds,
            MinesweeperDifficulty::Medium => self.medium = seconds,
            MinesweeperDifficulty::Hard => self.hard = seconds,
        }
    }
}

/// Active minesweeper session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesweeperGame {
    /// The board, indexed as grid[row][col].
    pub grid: Vec<Vec<Cell>>,
    pub rows: usize,
    pub cols: usize,
    /// Cursor position (row, col).
    pub cursor: (usize, usize),
    pub difficulty: MinesweeperDifficulty,
    pub status: MinesweeperStatus,
    /// Mines are placed lazily on the first reveal, never before.
    pub grid_generated: bool,
    pub total_mines: u16,
    pub flags_placed: u16,
    /// Elapsed play time in whole seconds.
    pub timer_seconds: u32,
    /// The first full second after the opening reveal reports 0, not 1.
    pub timer_grace_pending: bool,
    /// One-second timer cadence, running only while playing.
    pub clock: Cadence,
    /// Best times carried into the session; updated on win and loss.
    pub best_times: BestTimes,
}

impl MinesweeperGame {
    /// Create a fresh, idle session. The board stays mine-free until the
    /// opening reveal.
    pub fn new(difficulty: MinesweeperDifficulty, best_times: BestTimes) -> Self {
        let rows = difficulty.rows();
        let cols = difficulty.cols();
        let grid = vec![vec![Cell::default(); cols]; rows];

        Self {
            grid,
            rows,
            cols,
            cursor: (rows / 2, cols / 2),
            difficulty,
            status: MinesweeperStatus::Idle,
            grid_generated: false,
            total_mines: difficulty.mines(),
            flags_placed: 0,
            timer_seconds: 0,
            timer_grace_pending: false,
            clock: Cadence::new(TIMER_INTERVAL_MS),
            best_times,
        }
    }

    /// Move the cursor, clamping to the board.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let new_row = (self.cursor.0 as i32 + d_row).clamp(0, self.rows as i32 - 1) as usize;
        let new_col = (self.cursor.1 as i32 + d_col).clamp(0, self.cols as i32 - 1) as usize;
        self.cursor = (new_row, new_col);
    }

    /// Mines not yet accounted for by a flag. Never negative: placing a flag
    /// past zero is refused.
    pub fn mines_remaining(&self) -> u16 {
        self.total_mines - self.flags_placed
    }
}
