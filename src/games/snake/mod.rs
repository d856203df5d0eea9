//! Snake on a 20x20 wrap-free grid. Queued turns, food growth, and a
//! cabinet-wide high score.

pub mod logic;
pub mod types;

pub use logic::{process_input, tick_snake, SnakeInput};
pub use types::{Direction, Position, SnakeGame, SnakeStatus};
