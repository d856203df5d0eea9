//! Tetris game state and the tetromino table.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scheduler::Cadence;

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// Spawn column for the 4x4 mask, centering pieces in the well.
pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = 0;

pub const POINTS_PER_ROW: u32 = 100;
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval in ms: 800 at level 1, 50 faster per level, floor 100.
pub const BASE_GRAVITY_MS: u64 = 800;
pub const GRAVITY_STEP_MS: u64 = 50;
pub const MIN_GRAVITY_MS: u64 = 100;

/// Frame clamp, same guard as the other frame-driven games.
pub const MAX_FRAME_MS: u64 = 100;

/// 4x4 occupancy mask. 1 marks a filled cell.
pub type Shape = [[u8; 4]; 4];

/// Tetromino masks indexed by kind - 1, in kind order I, J, L, O, S, T, Z.
/// O sits in the center 2x2 so clockwise rotation maps it onto itself.
pub const SHAPES: [Shape; 7] = [
    // 1: I
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    // 2: J
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // 3: L
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // 4: O
    [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    // 5: S
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // 6: T
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    // 7: Z
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

/// An active or queued tetromino. `kind` (1..=7) doubles as the cell value
/// written into the grid on lock, so locked cells keep their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: u8,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn from_kind(kind: u8) -> Self {
        Self {
            kind,
            shape: SHAPES[(kind - 1) as usize],
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_kind(rng.gen_range(1..=7))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetrisGame {
    /// Row-major, row 0 at the top. 0 is empty, 1..=7 a locked piece kind.
    pub grid: Vec<Vec<u8>>,
    pub current: Piece,
    pub next: Piece,
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    pub high_score: u32,
    pub gravity: Cadence,
}

impl TetrisGame {
    pub fn new<R: Rng>(high_score: u32, rng: &mut R) -> Self {
        Self {
            grid: vec![vec![0; GRID_WIDTH]; GRID_HEIGHT],
            current: Piece::random(rng),
            next: Piece::random(rng),
            score: 0,
            lines_cleared: 0,
            level: 1,
            game_over: false,
            paused: false,
            high_score,
            gravity: Cadence::new(BASE_GRAVITY_MS),
        }
    }
}
