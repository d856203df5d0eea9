//! Flappy Bird: constant-gravity flapping through an endless stream of
//! pipe gaps, speeding up every five points.

pub mod logic;
pub mod types;

pub use logic::{process_input, tick_flappy, FlappyInput};
pub use types::{FlappyGame, FlappyStatus, GameOverReason, Pipe};
