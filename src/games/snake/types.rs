//! Snake game state.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scheduler::Cadence;

/// The arena is a square grid of this many cells per side.
pub const ARENA_SIZE: i32 = 20;

/// Milliseconds between movement steps.
pub const STEP_INTERVAL_MS: u64 = 150;

/// Points per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Widest frame the simulation will honor. Anything longer (a suspended
/// terminal, a debugger pause) is treated as a single slow frame.
pub const MAX_FRAME_MS: u64 = 500;

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < ARENA_SIZE && self.y >= 0 && self.y < ARENA_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta for one step. Y grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeGame {
    /// Head at the front, tail at the back.
    pub snake: VecDeque<Position>,
    pub direction: Direction,
    /// Turns buffered between steps, applied oldest-first.
    pub pending: VecDeque<Direction>,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub status: SnakeStatus,
    pub clock: Cadence,
}

impl SnakeGame {
    /// Three segments heading right from the arena center, food already on
    /// the board. Starts moving immediately.
    pub fn new<R: Rng>(high_score: u32, rng: &mut R) -> Self {
        let center = ARENA_SIZE / 2;
        let snake: VecDeque<Position> = (0..3)
            .map(|i| Position::new(center - i, center))
            .collect();

        let mut game = Self {
            snake,
            direction: Direction::Right,
            pending: VecDeque::new(),
            food: Position::new(0, 0),
            score: 0,
            high_score,
            status: SnakeStatus::Playing,
            clock: Cadence::new(STEP_INTERVAL_MS),
        };
        game.food = game.random_free_cell(rng);
        game
    }

    pub fn head(&self) -> Position {
        // The body is never empty
        self.snake.front().copied().unwrap_or(Position::new(0, 0))
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Random cell not covered by the snake. Gives up after 100 draws and
    /// returns the last candidate so a crowded board cannot spin forever.
    pub fn random_free_cell<R: Rng>(&self, rng: &mut R) -> Position {
        let mut candidate = Position::new(0, 0);
        for _ in 0..100 {
            candidate = Position::new(rng.gen_range(0..ARENA_SIZE), rng.gen_range(0..ARENA_SIZE));
            if !self.occupies(candidate) {
                return candidate;
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let game = SnakeGame::new(250, &mut rng);

        assert_eq!(
            game.snake,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.status, SnakeStatus::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 250);
        assert!(game.food.in_bounds());
        assert!(!game.occupies(game.food));
    }

    #[test]
    fn test_direction_opposites() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
    }

    #[test]
    fn test_random_free_cell_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = SnakeGame::new(0, &mut rng);
        for _ in 0..200 {
            let cell = game.random_free_cell(&mut rng);
            assert!(cell.in_bounds());
            assert!(!game.occupies(cell));
        }
    }
}
