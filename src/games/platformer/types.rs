//! Platformer game state.

use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::scheduler::Cadence;

pub const TILE_SIZE: f64 = 16.0;

pub const PLAYER_WIDTH: f64 = 24.0;
pub const PLAYER_HEIGHT: f64 = 32.0;
pub const DUCK_HEIGHT: f64 = 20.0;

/// Horizontal movement, canvas units per physics step.
pub const ACCELERATION: f64 = 0.5;
pub const GROUND_FRICTION: f64 = 0.8;
pub const AIR_RESISTANCE: f64 = 0.95;
pub const MAX_SPEED: f64 = 4.0;
pub const RUN_SPEED: f64 = 6.0;
pub const RUN_BOOST: f64 = 2.0;

pub const GRAVITY: f64 = 0.6;
pub const MAX_FALL_SPEED: f64 = 12.0;
pub const JUMP_VELOCITY: f64 = -10.0;
pub const STOMP_BOUNCE: f64 = -6.0;

/// Sprint meter: drains a point per step, recharges at half rate, and will
/// not re-engage until it has recovered past the floor.
pub const BOOST_MAX: f64 = 100.0;
pub const BOOST_DEPLETION: f64 = 1.0;
pub const BOOST_RECHARGE: f64 = 0.5;
pub const SPRINT_MIN_METER: f64 = 30.0;

/// Logical viewport the camera frames, scaled by the scene.
pub const VIEW_WIDTH: f64 = 320.0;
pub const VIEW_HEIGHT: f64 = 224.0;
pub const CAMERA_SMOOTHING: f64 = 0.1;

pub const ENEMY_WIDTH: f64 = 16.0;
pub const ENEMY_HEIGHT: f64 = 16.0;
pub const ENEMY_SPEED: f64 = 1.0;

pub const COIN_SIZE: f64 = 16.0;
pub const COIN_POINTS: u32 = 100;
pub const ENEMY_POINTS: u32 = 100;

pub const STARTING_LIVES: u32 = 3;
/// Level countdown in seconds, ticking once per 60 physics steps.
pub const LEVEL_TIME_SECONDS: u32 = 300;
pub const FRAMES_PER_SECOND: u64 = 60;

/// Flag banner length before the next level starts.
pub const TRANSITION_FRAMES: u32 = 120;

/// Fixed physics step, 60Hz.
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Held-intent snapshot fed to the engine every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
    pub duck: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Duck,
}

impl AnimationState {
    /// Physics steps per animation cell. Faster states cycle faster.
    pub fn frame_period(&self) -> u32 {
        match self {
            AnimationState::Idle => 30,
            AnimationState::Walk => 10,
            AnimationState::Run => 6,
            AnimationState::Jump => 1,
            AnimationState::Fall => 1,
            AnimationState::Duck => 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner, canvas units.
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub ducking: bool,
    pub running: bool,
    pub sprinting: bool,
    pub boost_meter: f64,
    pub facing_left: bool,
    pub animation: AnimationState,
    pub animation_frame: u32,
}

impl Player {
    pub fn at_spawn(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::default(),
            on_ground: false,
            ducking: false,
            running: false,
            sprinting: false,
            boost_meter: BOOST_MAX,
            facing_left: false,
            animation: AnimationState::Idle,
            animation_frame: 0,
        }
    }

    /// Collision height shrinks while ducking.
    pub fn height(&self) -> f64 {
        if self.ducking {
            DUCK_HEIGHT
        } else {
            PLAYER_HEIGHT
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel_x: f64,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformerStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
    Victory,
    LevelTransition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformerGame {
    pub player: Player,
    pub level: Level,
    pub level_index: usize,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Vec2>,
    pub camera: Camera,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub time_remaining: u32,
    /// Physics steps since the level started, drives the countdown.
    pub frame: u64,
    pub transition_timer: u32,
    pub status: PlatformerStatus,
    pub prev_jump_held: bool,
    pub prev_run_held: bool,
    pub clock: Cadence,
}

impl PlatformerGame {
    pub fn new(high_score: u32) -> Self {
        let level = Level::load(0);
        let mut game = Self {
            player: Player::at_spawn(level.spawn),
            level,
            level_index: 0,
            enemies: Vec::new(),
            coins: Vec::new(),
            camera: Camera::default(),
            score: 0,
            high_score,
            lives: STARTING_LIVES,
            time_remaining: LEVEL_TIME_SECONDS,
            frame: 0,
            transition_timer: 0,
            status: PlatformerStatus::Idle,
            prev_jump_held: false,
            prev_run_held: false,
            clock: Cadence::new(PHYSICS_TICK_MS),
        };
        game.populate_from_level();
        game
    }

    /// Swap in the level at `index` and reset everything scoped to it.
    pub fn enter_level(&mut self, index: usize) {
        self.install_level(Level::load(index), index);
    }

    /// Like [`enter_level`](Self::enter_level) but with a caller-supplied
    /// map. Score, lives, and high score carry over.
    pub fn install_level(&mut self, level: Level, index: usize) {
        self.level = level;
        self.level_index = index;
        self.player = Player::at_spawn(self.level.spawn);
        self.camera = Camera::default();
        self.time_remaining = LEVEL_TIME_SECONDS;
        self.frame = 0;
        self.transition_timer = 0;
        self.populate_from_level();
    }

    fn populate_from_level(&mut self) {
        self.enemies = self
            .level
            .enemy_spawns
            .iter()
            .map(|&pos| Enemy {
                pos,
                vel_x: ENEMY_SPEED,
                alive: true,
            })
            .collect();
        self.coins = self.level.coin_spawns.clone();
    }
}
