//! Flappy Bird physics and collision rules.

use rand::Rng;

use super::types::*;

/// UI-agnostic input actions for Flappy Bird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    Flap,
    TogglePause,
    Restart,
    Other,
}

/// Process player input.
pub fn process_input(game: &mut FlappyGame, input: FlappyInput) {
    match input {
        FlappyInput::Flap => match game.status {
            FlappyStatus::Idle => {
                game.status = FlappyStatus::Playing;
                flap(game);
            }
            FlappyStatus::Playing => flap(game),
            FlappyStatus::Paused | FlappyStatus::GameOver => {}
        },
        FlappyInput::TogglePause => match game.status {
            FlappyStatus::Playing => {
                game.status = FlappyStatus::Paused;
                game.clock.reset();
            }
            FlappyStatus::Paused => {
                game.status = FlappyStatus::Playing;
            }
            _ => {}
        },
        FlappyInput::Restart => {
            *game = FlappyGame::new(game.high_score);
        }
        FlappyInput::Other => {}
    }
}

/// Fire a flap impulse unless the cooldown is still running.
fn flap(game: &mut FlappyGame) {
    if game.jump_cooldown == 0 {
        game.velocity = JUMP_VELOCITY;
        game.jump_cooldown = JUMP_COOLDOWN_TICKS;
    }
}

/// Advance the simulation in fixed 16ms physics steps.
pub fn tick_flappy<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) {
    if game.status != FlappyStatus::Playing {
        return;
    }

    game.clock.accumulate(dt_ms.min(MAX_FRAME_MS));
    while game.clock.try_consume() {
        physics_step(game, rng);
        if game.status != FlappyStatus::Playing {
            break;
        }
    }
}

/// One fixed physics step.
fn physics_step<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    if game.jump_cooldown > 0 {
        game.jump_cooldown -= 1;
    }

    // 1. Integrate gravity; tilt follows velocity
    game.velocity += GRAVITY;
    game.bird_y += game.velocity;
    game.rotation = (game.velocity * 0.05).clamp(-0.5, 0.5);

    // 2. Floor and ceiling, bird clamped onto the boundary it hit
    if game.bird_y + BIRD_HEIGHT > CANVAS_HEIGHT {
        game.bird_y = CANVAS_HEIGHT - BIRD_HEIGHT;
        return end_game(game, GameOverReason::Ground);
    }
    if game.bird_y < 0.0 {
        game.bird_y = 0.0;
        return end_game(game, GameOverReason::Ceiling);
    }

    // 3. Spawn a pipe immediately on an empty field, then on the frame
    //    counter's cadence
    game.frame += 1;
    if game.pipes.is_empty() || game.frame % PIPE_SPAWN_INTERVAL_FRAMES == 0 {
        game.pipes.push(Pipe {
            x: CANVAS_WIDTH,
            height: rng.gen_range(PIPE_MIN_HEIGHT..=PIPE_MAX_HEIGHT),
            passed: false,
        });
    }

    // 4. Scroll pipes and score the ones whose trailing edge cleared the
    //    bird's center; every fifth point ramps the scroll speed
    let speed = BASE_SPEED * game.speed_multiplier;
    let bird_center_x = BIRD_X + BIRD_WIDTH / 2.0;
    for pipe in &mut game.pipes {
        pipe.x -= speed;
        if !pipe.passed && pipe.x + PIPE_WIDTH < bird_center_x {
            pipe.passed = true;
            game.score += 1;
            if game.score % SCORES_PER_SPEED_STEP == 0 {
                game.speed_multiplier =
                    (game.speed_multiplier + SPEED_STEP).min(MAX_SPEED_MULTIPLIER);
            }
        }
    }

    // 5. Drop pipes that scrolled fully off the left edge
    game.pipes.retain(|pipe| pipe.x + PIPE_WIDTH >= 0.0);

    // 6. Rectangle overlap against both halves of each pipe
    for pipe in &game.pipes {
        let hit_top = rects_overlap(
            BIRD_X,
            game.bird_y,
            BIRD_WIDTH,
            BIRD_HEIGHT,
            pipe.x,
            0.0,
            PIPE_WIDTH,
            pipe.gap_top(),
        );
        let hit_bottom = rects_overlap(
            BIRD_X,
            game.bird_y,
            BIRD_WIDTH,
            BIRD_HEIGHT,
            pipe.x,
            pipe.gap_bottom(),
            PIPE_WIDTH,
            CANVAS_HEIGHT - pipe.gap_bottom(),
        );
        if hit_top || hit_bottom {
            return end_game(game, GameOverReason::Pipe);
        }
    }
}

fn end_game(game: &mut FlappyGame, reason: GameOverReason) {
    game.status = FlappyStatus::GameOver;
    game.game_over_reason = Some(reason);
    game.high_score = game.high_score.max(game.score);
}

#[allow(clippy::too_many_arguments)]
fn rects_overlap(
    ax: f64,
    ay: f64,
    aw: f64,
    ah: f64,
    bx: f64,
    by: f64,
    bw: f64,
    bh: f64,
) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn playing_game() -> FlappyGame {
        let mut game = FlappyGame::new(0);
        game.status = FlappyStatus::Playing;
        game
    }

    fn step(game: &mut FlappyGame, rng: &mut StdRng) {
        tick_flappy(game, PHYSICS_TICK_MS, rng);
    }

    #[test]
    fn test_first_step_from_rest() {
        let mut game = playing_game();
        let mut rng = rng();
        let y0 = game.bird_y;

        step(&mut game, &mut rng);

        assert_eq!(game.velocity, 0.5);
        assert_eq!(game.bird_y, y0 + 0.5);
        assert_eq!(game.rotation, 0.025);
    }

    #[test]
    fn test_flap_sets_velocity_and_cooldown() {
        let mut game = playing_game();
        process_input(&mut game, FlappyInput::Flap);

        assert_eq!(game.velocity, JUMP_VELOCITY);
        assert_eq!(game.jump_cooldown, JUMP_COOLDOWN_TICKS);
    }

    #[test]
    fn test_flap_debounced_until_cooldown_expires() {
        let mut game = playing_game();
        let mut rng = rng();
        process_input(&mut game, FlappyInput::Flap);

        // A few steps in, a second flap is swallowed
        for _ in 0..3 {
            step(&mut game, &mut rng);
        }
        let velocity = game.velocity;
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.velocity, velocity);

        // Once the ten-step window passes, it fires again
        for _ in 0..7 {
            step(&mut game, &mut rng);
        }
        assert_eq!(game.jump_cooldown, 0);
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.velocity, JUMP_VELOCITY);
    }

    #[test]
    fn test_first_flap_starts_the_run() {
        let mut game = FlappyGame::new(0);
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.status, FlappyStatus::Playing);
        assert_eq!(game.velocity, JUMP_VELOCITY);
    }

    #[test]
    fn test_idle_game_does_not_simulate() {
        let mut game = FlappyGame::new(0);
        let mut rng = rng();
        tick_flappy(&mut game, 1000, &mut rng);
        assert_eq!(game.bird_y, 288.0);
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_ground_ends_run_with_clamp() {
        let mut game = playing_game();
        let mut rng = rng();
        game.bird_y = CANVAS_HEIGHT - BIRD_HEIGHT - 1.0;
        game.velocity = 6.0;

        step(&mut game, &mut rng);

        assert_eq!(game.status, FlappyStatus::GameOver);
        assert_eq!(game.game_over_reason, Some(GameOverReason::Ground));
        assert_eq!(game.bird_y, CANVAS_HEIGHT - BIRD_HEIGHT);
    }

    #[test]
    fn test_ceiling_ends_run_with_clamp() {
        let mut game = playing_game();
        let mut rng = rng();
        game.bird_y = 2.0;
        game.velocity = -6.0;

        step(&mut game, &mut rng);

        assert_eq!(game.status, FlappyStatus::GameOver);
        assert_eq!(game.game_over_reason, Some(GameOverReason::Ceiling));
        assert_eq!(game.bird_y, 0.0);
    }

    #[test]
    fn test_first_pipe_spawns_immediately() {
        let mut game = playing_game();
        let mut rng = rng();
        step(&mut game, &mut rng);

        assert_eq!(game.pipes.len(), 1);
        // Spawned at the right edge, already scrolled one step
        assert_eq!(game.pipes[0].x, CANVAS_WIDTH - BASE_SPEED);
        assert!(game.pipes[0].height >= PIPE_MIN_HEIGHT);
        assert!(game.pipes[0].height <= PIPE_MAX_HEIGHT);
    }

    #[test]
    fn test_pipes_spawn_on_frame_cadence() {
        let mut game = playing_game();
        let mut rng = rng();
        // Re-arm the flap each gravity cycle so the bird hovers clear of
        // both bounds for the full 100 steps
        for i in 0..100 {
            if i % 32 == 0 {
                game.velocity = JUMP_VELOCITY;
            }
            step(&mut game, &mut rng);
        }
        // One at frame 1 (empty field), one at frame 100
        assert_eq!(game.frame, 100);
        assert_eq!(game.pipes.len(), 2);
    }

    #[test]
    fn test_passing_a_pipe_scores() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        // Gap spans 250..400; the bird at 288 sails through. After one
        // step the trailing edge (26 - 2 + 52 = 76) is left of the bird
        // center (77).
        game.pipes.push(Pipe {
            x: 26.0,
            height: 250.0,
            passed: false,
        });

        step(&mut game, &mut rng);

        assert_eq!(game.score, 1);
        assert!(game.pipes[0].passed);
        assert_eq!(game.status, FlappyStatus::Playing);

        // Passed pipes never score twice
        step(&mut game, &mut rng);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_every_fifth_point_ramps_speed() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        game.score = 4;
        game.pipes.push(Pipe {
            x: 26.0,
            height: 250.0,
            passed: false,
        });

        step(&mut game, &mut rng);

        assert_eq!(game.score, 5);
        assert!((game.speed_multiplier - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_speed_multiplier_caps_at_two() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        game.score = 49;
        game.speed_multiplier = 1.95;
        // At 3.9 units per step the trailing edge needs to start at 25 to
        // clear the bird center this step
        game.pipes.push(Pipe {
            x: 25.0,
            height: 250.0,
            passed: false,
        });

        step(&mut game, &mut rng);

        assert_eq!(game.score, 50);
        assert_eq!(game.speed_multiplier, MAX_SPEED_MULTIPLIER);
    }

    #[test]
    fn test_offscreen_pipes_removed() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        game.pipes.push(Pipe {
            x: -51.0,
            height: 250.0,
            passed: true,
        });

        step(&mut game, &mut rng);

        // -53 + 52 < 0: gone
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        // Bird at 288 overlaps a top pipe reaching down to 300
        game.pipes.push(Pipe {
            x: BIRD_X,
            height: 300.0,
            passed: false,
        });

        step(&mut game, &mut rng);

        assert_eq!(game.status, FlappyStatus::GameOver);
        assert_eq!(game.game_over_reason, Some(GameOverReason::Pipe));
    }

    #[test]
    fn test_bird_in_gap_survives() {
        let mut game = playing_game();
        let mut rng = rng();
        game.frame = 5;
        game.pipes.push(Pipe {
            x: BIRD_X,
            height: 200.0,
            passed: false,
        });

        step(&mut game, &mut rng);

        // Gap 200..350 comfortably contains the bird
        assert_eq!(game.status, FlappyStatus::Playing);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = playing_game();
        let mut rng = rng();
        process_input(&mut game, FlappyInput::TogglePause);
        assert_eq!(game.status, FlappyStatus::Paused);

        let y = game.bird_y;
        tick_flappy(&mut game, 1000, &mut rng);
        assert_eq!(game.bird_y, y);

        // Flapping while paused is ignored
        process_input(&mut game, FlappyInput::Flap);
        assert_eq!(game.velocity, 0.0);

        process_input(&mut game, FlappyInput::TogglePause);
        assert_eq!(game.status, FlappyStatus::Playing);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = playing_game();
        let mut rng = rng();
        // 10 seconds clamps to 100ms: six 16ms steps, not six hundred
        tick_flappy(&mut game, 10_000, &mut rng);
        assert_eq!(game.frame, 6);
    }

    #[test]
    fn test_game_over_updates_high_score_and_restart_keeps_it() {
        let mut game = playing_game();
        let mut rng = rng();
        game.score = 30;
        game.high_score = 12;
        game.bird_y = CANVAS_HEIGHT - BIRD_HEIGHT - 1.0;
        game.velocity = 6.0;

        step(&mut game, &mut rng);
        assert_eq!(game.high_score, 30);

        process_input(&mut game, FlappyInput::Restart);
        assert_eq!(game.status, FlappyStatus::Idle);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 30);
        assert!(game.pipes.is_empty());
    }
}
