//! Minesweeper.
//!
//! Classic mine-clearing on three board presets. Mines are placed lazily on
//! the first reveal so the opening move is always safe, and best completion
//! times are tracked per difficulty.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
