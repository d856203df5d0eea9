//! Tick scheduling primitives shared by all games.
//!
//! The event loop measures wall-clock time with a [`FrameClock`] and hands the
//! elapsed milliseconds to the active game's tick function. Games that step on
//! a fixed interval (snake movement, gravity, the minesweeper clock) embed a
//! [`Cadence`] accumulator and consume whole steps from it; frame-driven games
//! do the same with a 16ms physics interval. Pausing simply stops feeding a
//! cadence, and `reset` guarantees no banked steps fire on resume.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Fixed-interval step accumulator.
///
/// Feed it elapsed time with `accumulate`, then drain whole steps with
/// `try_consume` in a loop. Left-over time below one interval stays banked
/// for the next frame, so step counts stay exact across uneven frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cadence {
    interval_ms: u64,
    accumulated_ms: u64,
}

impl Cadence {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    /// Bank elapsed time toward future steps.
    pub fn accumulate(&mut self, dt_ms: u64) {
        self.accumulated_ms += dt_ms;
    }

    /// Consume one step if at least a full interval has been banked.
    pub fn try_consume(&mut self) -> bool {
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }

    /// Drop any banked time. Called on pause and restart so no queued
    /// steps fire when ticking resumes.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    /// Change the step interval. Banked time carries over, so a game can
    /// speed up mid-session (gravity shrinking with level) without a hitch.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// Wall-clock frame timer for the event loop.
///
/// `tick` returns whole milliseconds since the previous call. The caller is
/// expected to clamp the result per game (a stalled terminal should not turn
/// into a physics explosion).
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the last call (or construction).
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_millis() as u64;
        self.last = now;
        dt
    }

    /// Forget elapsed time, so the next `tick` starts from now.
    pub fn restart(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
