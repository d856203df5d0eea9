//! Snake movement, growth, and collision rules.

use rand::Rng;

use super::types::*;

/// UI-agnostic input actions for Snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeInput {
    Up,
    Down,
    Left,
    Right,
    TogglePause,
    Restart,
    Other,
}

/// Process player input.
pub fn process_input<R: Rng>(game: &mut SnakeGame, input: SnakeInput, rng: &mut R) {
    match input {
        SnakeInput::Restart => {
            if game.status == SnakeStatus::GameOver {
                *game = SnakeGame::new(game.high_score, rng);
            }
        }
        SnakeInput::TogglePause => match game.status {
            SnakeStatus::Playing => {
                game.status = SnakeStatus::Paused;
                game.clock.reset();
            }
            SnakeStatus::Paused => {
                game.status = SnakeStatus::Playing;
            }
            SnakeStatus::GameOver => {}
        },
        SnakeInput::Up | SnakeInput::Down | SnakeInput::Left | SnakeInput::Right => {
            if game.status == SnakeStatus::Playing {
                let direction = match input {
                    SnakeInput::Up => Direction::Up,
                    SnakeInput::Down => Direction::Down,
                    SnakeInput::Left => Direction::Left,
                    _ => Direction::Right,
                };
                game.pending.push_back(direction);
            }
        }
        SnakeInput::Other => {}
    }
}

/// Advance the simulation. `dt_ms` is milliseconds since the last call;
/// frames longer than [`MAX_FRAME_MS`] are clamped so a stalled terminal
/// does not replay as a burst of steps.
pub fn tick_snake<R: Rng>(game: &mut SnakeGame, dt_ms: u64, rng: &mut R) {
    if game.status != SnakeStatus::Playing {
        return;
    }

    game.clock.accumulate(dt_ms.min(MAX_FRAME_MS));
    while game.clock.try_consume() {
        step(game, rng);
        if game.status != SnakeStatus::Playing {
            break;
        }
    }
}

/// One movement step.
fn step<R: Rng>(game: &mut SnakeGame, rng: &mut R) {
    // 1. Drain the turn queue oldest-first. Each entry is checked against
    //    the direction as already updated by earlier entries this step.
    while let Some(turn) = game.pending.pop_front() {
        if turn != game.direction.opposite() {
            game.direction = turn;
        }
    }

    // 2. New head one cell ahead
    let (dx, dy) = game.direction.delta();
    let head = game.head();
    let new_head = Position::new(head.x + dx, head.y + dy);

    // 3. Walls end the game
    if !new_head.in_bounds() {
        end_game(game);
        return;
    }

    // 4. So does the body, tail included: the tail cell only frees up
    //    after the head has moved.
    if game.occupies(new_head) {
        end_game(game);
        return;
    }

    // 5. Eating grows by one (tail stays put) and respawns the food
    if new_head == game.food {
        game.snake.push_front(new_head);
        game.score += FOOD_POINTS;
        game.food = game.random_free_cell(rng);
        return;
    }

    // 6. Plain move: advance head, drop tail
    game.snake.push_front(new_head);
    game.snake.pop_back();
}

fn end_game(game: &mut SnakeGame) {
    game.status = SnakeStatus::GameOver;
    game.high_score = game.high_score.max(game.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn game_with_body(body: &[(i32, i32)], direction: Direction) -> SnakeGame {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = SnakeGame::new(0, &mut rng);
        game.snake = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        game.direction = direction;
        game.pending = VecDeque::new();
        // Park the food away from the play under test
        game.food = Position::new(0, 19);
        game
    }

    fn step_once(game: &mut SnakeGame) {
        let mut rng = StdRng::seed_from_u64(7);
        tick_snake(game, STEP_INTERVAL_MS, &mut rng);
    }

    #[test]
    fn test_step_moves_head_and_tail() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        step_once(&mut game);

        assert_eq!(
            game.snake,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(game.status, SnakeStatus::Playing);
    }

    #[test]
    fn test_reverse_turn_rejected() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);
        process_input(&mut game, SnakeInput::Left, &mut rng);
        step_once(&mut game);

        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.head(), Position::new(11, 10));
    }

    #[test]
    fn test_queued_turns_apply_in_order() {
        // Up then Left queued within one step: Up applies first, then Left
        // is no longer a reversal and applies too. The step itself moves
        // in the final direction.
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);
        process_input(&mut game, SnakeInput::Up, &mut rng);
        process_input(&mut game, SnakeInput::Left, &mut rng);
        step_once(&mut game);

        assert_eq!(game.direction, Direction::Left);
        assert_eq!(game.head(), Position::new(9, 10));
    }

    #[test]
    fn test_queue_drained_every_step() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);
        process_input(&mut game, SnakeInput::Up, &mut rng);
        step_once(&mut game);
        assert!(game.pending.is_empty());
        assert_eq!(game.direction, Direction::Up);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut game = game_with_body(&[(19, 10), (18, 10), (17, 10)], Direction::Right);
        game.score = 40;
        step_once(&mut game);

        assert_eq!(game.status, SnakeStatus::GameOver);
        assert_eq!(game.high_score, 40);
        // The body is left where it was
        assert_eq!(game.head(), Position::new(19, 10));
    }

    #[test]
    fn test_self_collision_ends_game() {
        // Hook shape: head turns down into its own body
        let mut game = game_with_body(
            &[(10, 10), (10, 9), (9, 9), (8, 9), (8, 10), (8, 11)],
            Direction::Down,
        );
        let mut rng = StdRng::seed_from_u64(1);
        process_input(&mut game, SnakeInput::Left, &mut rng);
        step_once(&mut game);
        // Head at (10,10) heading Left hits (9,10)? No: (9,10) is free.
        assert_eq!(game.status, SnakeStatus::Playing);

        // Now drive it into the column at x=8
        process_input(&mut game, SnakeInput::Left, &mut rng);
        step_once(&mut game);
        assert_eq!(game.status, SnakeStatus::GameOver);
    }

    #[test]
    fn test_tail_cell_counts_as_occupied() {
        // A 2x2 loop chasing its own tail: the head moves into the cell the
        // tail is about to vacate. The check runs before the tail moves, so
        // this is a collision.
        let mut game = game_with_body(&[(10, 10), (11, 10), (11, 11), (10, 11)], Direction::Down);
        step_once(&mut game);

        assert_eq!(game.status, SnakeStatus::GameOver);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        game.food = Position::new(11, 10);
        step_once(&mut game);

        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.head(), Position::new(11, 10));
        // Tail did not move
        assert_eq!(game.snake.back(), Some(&Position::new(8, 10)));
        assert_eq!(game.score, FOOD_POINTS);
        // Food respawned somewhere free
        assert!(!game.occupies(game.food));
    }

    #[test]
    fn test_pause_freezes_and_drops_partial_step() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);

        tick_snake(&mut game, 100, &mut rng);
        assert_eq!(game.head(), Position::new(10, 10));

        process_input(&mut game, SnakeInput::TogglePause, &mut rng);
        assert_eq!(game.status, SnakeStatus::Paused);
        tick_snake(&mut game, 10_000, &mut rng);
        assert_eq!(game.head(), Position::new(10, 10));

        process_input(&mut game, SnakeInput::TogglePause, &mut rng);
        // The banked 100ms was dropped on pause: 100ms more is not a step
        tick_snake(&mut game, 100, &mut rng);
        assert_eq!(game.head(), Position::new(10, 10));
        tick_snake(&mut game, 50, &mut rng);
        assert_eq!(game.head(), Position::new(11, 10));
    }

    #[test]
    fn test_direction_input_ignored_while_paused() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);
        process_input(&mut game, SnakeInput::TogglePause, &mut rng);
        process_input(&mut game, SnakeInput::Up, &mut rng);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = game_with_body(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);

        // 10 seconds away from the terminal must not replay 66 steps:
        // the frame clamps to 500ms, i.e. 3 steps at 150ms.
        tick_snake(&mut game, 10_000, &mut rng);
        assert_eq!(game.head(), Position::new(13, 10));
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = SnakeGame::new(90, &mut rng);
        let head_before = game.head();
        process_input(&mut game, SnakeInput::Restart, &mut rng);
        assert_eq!(game.head(), head_before);

        game.status = SnakeStatus::GameOver;
        game.score = 60;
        game.high_score = 90;
        process_input(&mut game, SnakeInput::Restart, &mut rng);

        assert_eq!(game.status, SnakeStatus::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 90);
        assert_eq!(game.snake.len(), 3);
    }

    #[test]
    fn test_high_score_updates_on_game_over() {
        let mut game = game_with_body(&[(19, 10), (18, 10), (17, 10)], Direction::Right);
        game.score = 120;
        game.high_score = 50;
        step_once(&mut game);

        assert_eq!(game.status, SnakeStatus::GameOver);
        assert_eq!(game.high_score, 120);
    }
}
