//! Side-scrolling platformer: tile collision, sprint meter, patrolling
//! enemies, coins, and a flag pole at the end of each level.

pub mod level;
pub mod logic;
pub mod types;

pub use level::Level;
pub use logic::{process_input, tick_platformer, PlatformerInput};
pub use types::{AnimationState, Buttons, PlatformerGame, PlatformerStatus};
