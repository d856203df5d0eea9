//! Tetris on a 10x20 well. A pure action reducer drives every state
//! change, from player moves to gravity ticks.

pub mod logic;
pub mod types;

pub use logic::{apply_action, tick_tetris, TetrisAction};
pub use types::{Piece, TetrisGame};
