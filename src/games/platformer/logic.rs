//! Platformer physics, entities, and level progression.

use super::level::{Level, LEVEL_COUNT};
use super::types::*;

/// Discrete input actions. Held movement comes in as [`Buttons`] each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformerInput {
    Start,
    TogglePause,
    Restart,
    Other,
}

/// Process a discrete input action.
pub fn process_input(game: &mut PlatformerGame, input: PlatformerInput) {
    match input {
        PlatformerInput::Start => {
            if game.status == PlatformerStatus::Idle {
                game.status = PlatformerStatus::Playing;
            }
        }
        PlatformerInput::TogglePause => match game.status {
            PlatformerStatus::Playing => {
                game.status = PlatformerStatus::Paused;
                game.clock.reset();
            }
            PlatformerStatus::Paused => {
                game.status = PlatformerStatus::Playing;
            }
            _ => {}
        },
        PlatformerInput::Restart => {
            *game = PlatformerGame::new(game.high_score);
        }
        PlatformerInput::Other => {}
    }
}

/// Advance the simulation in fixed 16ms physics steps. `buttons` is the
/// held-key snapshot for this frame.
pub fn tick_platformer(game: &mut PlatformerGame, dt_ms: u64, buttons: Buttons) {
    match game.status {
        PlatformerStatus::Playing | PlatformerStatus::LevelTransition => {}
        _ => return,
    }

    game.clock.accumulate(dt_ms.min(MAX_FRAME_MS));
    while game.clock.try_consume() {
        match game.status {
            PlatformerStatus::Playing => step_playing(game, buttons),
            PlatformerStatus::LevelTransition => step_transition(game),
            _ => break,
        }
    }
}

/// One physics step while playing.
fn step_playing(game: &mut PlatformerGame, buttons: Buttons) {
    game.frame += 1;

    // 1. Stance: duck keeps the feet planted while the hitbox shrinks
    let want_duck = buttons.duck && game.player.on_ground;
    if want_duck && !game.player.ducking {
        game.player.pos.y += PLAYER_HEIGHT - DUCK_HEIGHT;
        game.player.ducking = true;
    } else if !want_duck && game.player.ducking {
        game.player.pos.y -= PLAYER_HEIGHT - DUCK_HEIGHT;
        game.player.ducking = false;
    }

    // 2. Sprint engages on a fresh run press with enough meter, and drops
    //    the instant run is released
    let run_pressed = buttons.run && !game.prev_run_held;
    game.player.running = buttons.run;
    if buttons.run {
        if run_pressed && !game.player.sprinting && game.player.boost_meter >= SPRINT_MIN_METER {
            game.player.sprinting = true;
        }
    } else {
        game.player.sprinting = false;
    }
    game.prev_run_held = buttons.run;

    // 3. Horizontal acceleration, friction, speed cap
    apply_horizontal(&mut game.player, buttons);

    // 4. Gravity with terminal velocity
    game.player.vel.y = (game.player.vel.y + GRAVITY).min(MAX_FALL_SPEED);

    // 5. Axis-separated tile collision
    move_horizontal(&game.level, &mut game.player);
    move_vertical(&game.level, &mut game.player);

    // 6. Jump from the ground on a fresh press
    let jump_pressed = buttons.jump && !game.prev_jump_held;
    if jump_pressed && game.player.on_ground && !game.player.ducking {
        game.player.vel.y = JUMP_VELOCITY;
        game.player.on_ground = false;
    }
    game.prev_jump_held = buttons.jump;

    // 7. Sprint meter
    let player = &mut game.player;
    if player.sprinting {
        player.boost_meter = (player.boost_meter - BOOST_DEPLETION).max(0.0);
        if player.boost_meter <= 0.0 {
            player.sprinting = false;
        }
    } else {
        player.boost_meter = (player.boost_meter + BOOST_RECHARGE).min(BOOST_MAX);
    }

    // 8. Animation from grounded/velocity/duck
    update_animation(player);

    // 9. Camera eases toward the player, clamped to the level
    update_camera(game);

    // 10. Enemies, pickups, hazards, and progression
    update_enemies(game);
    if resolve_enemy_contact(game) {
        return;
    }
    collect_coins(game);

    if game.player.pos.y > game.level.pixel_height() {
        lose_life(game);
        return;
    }

    if game.player.pos.x + PLAYER_WIDTH >= game.level.flag_x {
        game.status = PlatformerStatus::LevelTransition;
        game.transition_timer = TRANSITION_FRAMES;
        return;
    }

    // 11. Level countdown, one second per 60 steps
    if game.frame % FRAMES_PER_SECOND == 0 {
        game.time_remaining = game.time_remaining.saturating_sub(1);
        if game.time_remaining == 0 {
            lose_life(game);
        }
    }
}

/// Flag banner countdown, then the next level or the win screen.
fn step_transition(game: &mut PlatformerGame) {
    game.transition_timer = game.transition_timer.saturating_sub(1);
    if game.transition_timer > 0 {
        return;
    }

    let next = game.level_index + 1;
    if next < LEVEL_COUNT {
        game.enter_level(next);
        game.status = PlatformerStatus::Playing;
    } else {
        game.status = PlatformerStatus::Victory;
        game.high_score = game.high_score.max(game.score);
    }
}

fn apply_horizontal(player: &mut Player, buttons: Buttons) {
    let cap = if player.sprinting {
        RUN_SPEED + RUN_BOOST
    } else if player.running {
        RUN_SPEED
    } else {
        MAX_SPEED
    };

    let steering = !player.ducking && (buttons.left ^ buttons.right);
    if steering {
        if buttons.left {
            player.vel.x -= ACCELERATION;
            player.facing_left = true;
        } else {
            player.vel.x += ACCELERATION;
            player.facing_left = false;
        }
    } else {
        let damping = if player.on_ground {
            GROUND_FRICTION
        } else {
            AIR_RESISTANCE
        };
        player.vel.x *= damping;
        if player.vel.x.abs() < 0.05 {
            player.vel.x = 0.0;
        }
    }

    player.vel.x = player.vel.x.clamp(-cap, cap);
}

/// Solid tiles overlapped by the player rect, as an index range.
fn tile_span(pos: f64, size: f64) -> (i32, i32) {
    let first = (pos / TILE_SIZE).floor() as i32;
    let last = ((pos + size - 0.01) / TILE_SIZE).floor() as i32;
    (first, last)
}

fn move_horizontal(level: &Level, player: &mut Player) {
    player.pos.x += player.vel.x;

    let (top, bottom) = tile_span(player.pos.y, player.height());
    let (left, right) = tile_span(player.pos.x, PLAYER_WIDTH);

    'scan: for row in top..=bottom {
        for col in left..=right {
            if !level.solid_at(row, col) {
                continue;
            }
            if player.vel.x > 0.0 {
                player.pos.x = col as f64 * TILE_SIZE - PLAYER_WIDTH;
            } else if player.vel.x < 0.0 {
                player.pos.x = (col + 1) as f64 * TILE_SIZE;
            }
            player.vel.x = 0.0;
            break 'scan;
        }
    }

    // The level edges are walls too
    let max_x = level.pixel_width() - PLAYER_WIDTH;
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = player.vel.x.max(0.0);
    } else if player.pos.x > max_x {
        player.pos.x = max_x;
        player.vel.x = player.vel.x.min(0.0);
    }
}

fn move_vertical(level: &Level, player: &mut Player) {
    player.on_ground = false;
    player.pos.y += player.vel.y;

    let height = player.height();
    let (top, bottom) = tile_span(player.pos.y, height);
    let (left, right) = tile_span(player.pos.x, PLAYER_WIDTH);

    'scan: for row in top..=bottom {
        for col in left..=right {
            if !level.solid_at(row, col) {
                continue;
            }
            if player.vel.y > 0.0 {
                // Landed: feet snap to the tile top
                player.pos.y = row as f64 * TILE_SIZE - height;
                player.on_ground = true;
            } else if player.vel.y < 0.0 {
                // Head bump: snap below the tile
                player.pos.y = (row + 1) as f64 * TILE_SIZE;
            }
            player.vel.y = 0.0;
            break 'scan;
        }
    }
}

fn update_animation(player: &mut Player) {
    let next = if player.ducking {
        AnimationState::Duck
    } else if !player.on_ground {
        if player.vel.y < 0.0 {
            AnimationState::Jump
        } else {
            AnimationState::Fall
        }
    } else if player.vel.x.abs() > MAX_SPEED {
        AnimationState::Run
    } else if player.vel.x.abs() > 0.1 {
        AnimationState::Walk
    } else {
        AnimationState::Idle
    };

    if next != player.animation {
        player.animation = next;
        player.animation_frame = 0;
    } else {
        player.animation_frame = player.animation_frame.wrapping_add(1);
    }
}

fn update_camera(game: &mut PlatformerGame) {
    let level = &game.level;
    let player = &game.player;

    let max_x = (level.pixel_width() - VIEW_WIDTH).max(0.0);
    let max_y = (level.pixel_height() - VIEW_HEIGHT).max(0.0);
    game.camera.target_x =
        (player.pos.x + PLAYER_WIDTH / 2.0 - VIEW_WIDTH / 2.0).clamp(0.0, max_x);
    game.camera.target_y =
        (player.pos.y + player.height() / 2.0 - VIEW_HEIGHT / 2.0).clamp(0.0, max_y);

    game.camera.x += (game.camera.target_x - game.camera.x) * CAMERA_SMOOTHING;
    game.camera.y += (game.camera.target_y - game.camera.y) * CAMERA_SMOOTHING;
}

/// Patrol: walk until the leading edge meets a wall or a ledge, then turn.
fn update_enemies(game: &mut PlatformerGame) {
    let level = &game.level;
    for enemy in game.enemies.iter_mut().filter(|e| e.alive) {
        let next_x = enemy.pos.x + enemy.vel_x;
        let lead_x = if enemy.vel_x > 0.0 {
            next_x + ENEMY_WIDTH
        } else {
            next_x
        };
        let mid_y = enemy.pos.y + ENEMY_HEIGHT / 2.0;
        let foot_y = enemy.pos.y + ENEMY_HEIGHT + 1.0;

        let wall_ahead = level.solid_at_point(lead_x, mid_y);
        let ledge_ahead = !level.solid_at_point(lead_x, foot_y);
        if wall_ahead || ledge_ahead {
            enemy.vel_x = -enemy.vel_x;
        } else {
            enemy.pos.x = next_x;
        }
    }
}

/// Returns true if the player was hurt (and the step should end).
fn resolve_enemy_contact(game: &mut PlatformerGame) -> bool {
    let height = game.player.height();
    let (px, py) = (game.player.pos.x, game.player.pos.y);
    let (vy, bottom) = (game.player.vel.y, py + height);

    let mut stomped = Vec::new();
    let mut hurt = false;
    for (index, enemy) in game.enemies.iter().enumerate() {
        if !enemy.alive {
            continue;
        }
        let overlap = rects_overlap(
            px,
            py,
            PLAYER_WIDTH,
            height,
            enemy.pos.x,
            enemy.pos.y,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
        );
        if !overlap {
            continue;
        }
        // A stomp means the feet were above the enemy before this frame's
        // fall carried them in
        let was_above = bottom - vy <= enemy.pos.y + 1.0;
        if vy > 0.0 && was_above {
            stomped.push(index);
        } else {
            hurt = true;
            break;
        }
    }

    for index in stomped {
        game.enemies[index].alive = false;
        game.score += ENEMY_POINTS;
        game.player.vel.y = STOMP_BOUNCE;
        game.player.on_ground = false;
    }
    game.enemies.retain(|enemy| enemy.alive);

    if hurt {
        lose_life(game);
    }
    hurt
}

fn collect_coins(game: &mut PlatformerGame) {
    let height = game.player.height();
    let (px, py) = (game.player.pos.x, game.player.pos.y);

    let before = game.coins.len();
    game.coins.retain(|coin| {
        !rects_overlap(
            px, py, PLAYER_WIDTH, height, coin.x, coin.y, COIN_SIZE, COIN_SIZE,
        )
    });
    game.score += (before - game.coins.len()) as u32 * COIN_POINTS;
}

/// Take a life; respawn at the level start, or end the game at zero.
fn lose_life(game: &mut PlatformerGame) {
    game.lives = game.lives.saturating_sub(1);
    if game.lives == 0 {
        game.status = PlatformerStatus::GameOver;
        game.high_score = game.high_score.max(game.score);
    } else {
        game.player = Player::at_spawn(game.level.spawn);
        game.time_remaining = LEVEL_TIME_SECONDS;
        game.frame = 0;
    }
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
