//! Flappy Bird game state.

use serde::{Deserialize, Serialize};

use crate::scheduler::Cadence;

/// Logical canvas the physics runs on. Scenes scale it to the terminal.
pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// The bird's fixed left edge and hitbox.
pub const BIRD_X: f64 = 60.0;
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;

/// Per-step downward acceleration and flap impulse, canvas units.
pub const GRAVITY: f64 = 0.5;
pub const JUMP_VELOCITY: f64 = -8.0;

/// Physics steps a flap is locked out for after firing.
pub const JUMP_COOLDOWN_TICKS: u8 = 10;

pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_MIN_HEIGHT: f64 = 50.0;
pub const PIPE_MAX_HEIGHT: f64 = 300.0;

/// A new pipe every this many physics steps.
pub const PIPE_SPAWN_INTERVAL_FRAMES: u64 = 100;

/// Horizontal scroll speed and its score-driven ramp.
pub const BASE_SPEED: f64 = 2.0;
pub const SPEED_STEP: f64 = 0.1;
pub const MAX_SPEED_MULTIPLIER: f64 = 2.0;
pub const SCORES_PER_SPEED_STEP: u32 = 5;

/// Fixed physics step, 60Hz.
pub const PHYSICS_TICK_MS: u64 = 16;

/// Frame clamp for stalled terminals.
pub const MAX_FRAME_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlappyStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Ground,
    Ceiling,
    Pipe,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Ground => "hit the ground",
            GameOverReason::Ceiling => "hit the ceiling",
            GameOverReason::Pipe => "hit a pipe",
        }
    }
}

/// One pipe pair. `height` is the top pipe's length; the bottom pipe
/// starts [`PIPE_GAP`] below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f64,
    pub height: f64,
    pub passed: bool,
}

impl Pipe {
    pub fn gap_top(&self) -> f64 {
        self.height
    }

    pub fn gap_bottom(&self) -> f64 {
        self.height + PIPE_GAP
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlappyGame {
    /// Bird top edge. X never changes; the world scrolls instead.
    pub bird_y: f64,
    pub velocity: f64,
    /// Render tilt in radians, derived from velocity each step.
    pub rotation: f64,
    pub pipes: Vec<Pipe>,
    /// Physics steps since the run started, drives pipe spawning.
    pub frame: u64,
    pub score: u32,
    pub high_score: u32,
    pub speed_multiplier: f64,
    pub jump_cooldown: u8,
    pub status: FlappyStatus,
    pub game_over_reason: Option<GameOverReason>,
    pub clock: Cadence,
}

impl FlappyGame {
    /// Bird at rest mid-canvas, waiting for the first flap.
    pub fn new(high_score: u32) -> Self {
        Self {
            bird_y: (CANVAS_HEIGHT - BIRD_HEIGHT) / 2.0,
            velocity: 0.0,
            rotation: 0.0,
            pipes: Vec::new(),
            frame: 0,
            score: 0,
            high_score,
            speed_multiplier: 1.0,
            jump_cooldown: 0,
            status: FlappyStatus::Idle,
            game_over_reason: None,
            clock: Cadence::new(PHYSICS_TICK_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_idle_at_rest() {
        let game = FlappyGame::new(17);
        assert_eq!(game.status, FlappyStatus::Idle);
        assert_eq!(game.bird_y, 288.0);
        assert_eq!(game.velocity, 0.0);
        assert!(game.pipes.is_empty());
        assert_eq!(game.high_score, 17);
        assert_eq!(game.game_over_reason, None);
    }

    #[test]
    fn test_pipe_gap_edges() {
        let pipe = Pipe {
            x: 100.0,
            height: 220.0,
            passed: false,
        };
        assert_eq!(pipe.gap_top(), 220.0);
        assert_eq!(pipe.gap_bottom(), 370.0);
    }

    #[test]
    fn test_game_over_reason_labels() {
        assert_eq!(GameOverReason::Ground.as_str(), "hit the ground");
        assert_eq!(GameOverReason::Pipe.as_str(), "hit a pipe");
    }
}
