//! Tetris rules as a single action reducer.

use rand::Rng;

use super::types::*;

/// Everything that can happen to a Tetris game, player moves and gravity
/// alike, funneled through [`apply_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Tick,
    TogglePause,
    Restart,
}

/// Apply one action to the game.
pub fn apply_action<R: Rng>(game: &mut TetrisGame, action: TetrisAction, rng: &mut R) {
    match action {
        TetrisAction::Restart => {
            *game = TetrisGame::new(game.high_score, rng);
            return;
        }
        TetrisAction::TogglePause => {
            if !game.game_over {
                game.paused = !game.paused;
                if game.paused {
                    game.gravity.reset();
                }
            }
            return;
        }
        _ => {}
    }

    if game.game_over || game.paused {
        return;
    }

    match action {
        TetrisAction::MoveLeft => try_shift(game, -1),
        TetrisAction::MoveRight => try_shift(game, 1),
        TetrisAction::SoftDrop => {
            if fits(&game.grid, &game.current.shape, game.current.x, game.current.y + 1) {
                game.current.y += 1;
            }
        }
        TetrisAction::Rotate => {
            let rotated = rotate_cw(&game.current.shape);
            if fits(&game.grid, &rotated, game.current.x, game.current.y) {
                game.current.shape = rotated;
            }
        }
        TetrisAction::Tick => {
            if fits(&game.grid, &game.current.shape, game.current.x, game.current.y + 1) {
                game.current.y += 1;
            } else {
                lock_piece(game, rng);
            }
        }
        TetrisAction::HardDrop => {
            while fits(&game.grid, &game.current.shape, game.current.x, game.current.y + 1) {
                game.current.y += 1;
            }
            lock_piece(game, rng);
        }
        TetrisAction::TogglePause | TetrisAction::Restart => {}
    }
}

/// Advance gravity. Each elapsed gravity interval issues one `Tick`.
pub fn tick_tetris<R: Rng>(game: &mut TetrisGame, dt_ms: u64, rng: &mut R) {
    if game.game_over || game.paused {
        return;
    }

    game.gravity.accumulate(dt_ms.min(MAX_FRAME_MS));
    while game.gravity.try_consume() {
        apply_action(game, TetrisAction::Tick, rng);
        if game.game_over {
            break;
        }
    }
}

/// Clockwise quarter turn of the 4x4 mask. No wall kicks: a rotation that
/// does not fit in place is simply refused.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let mut rotated = [[0u8; 4]; 4];
    for y in 0..4 {
        for x in 0..4 {
            rotated[y][x] = shape[3 - x][y];
        }
    }
    rotated
}

/// True if the mask sits fully inside the well on empty cells.
pub fn fits(grid: &[Vec<u8>], shape: &Shape, x: i32, y: i32) -> bool {
    for (row, cells) in shape.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let grid_x = x + col as i32;
            let grid_y = y + row as i32;
            if grid_x < 0 || grid_x >= GRID_WIDTH as i32 || grid_y < 0 || grid_y >= GRID_HEIGHT as i32
            {
                return false;
            }
            if grid[grid_y as usize][grid_x as usize] != 0 {
                return false;
            }
        }
    }
    true
}

fn try_shift(game: &mut TetrisGame, dx: i32) {
    if fits(&game.grid, &game.current.shape, game.current.x + dx, game.current.y) {
        game.current.x += dx;
    }
}

/// Merge the active piece into the grid, clear rows, and promote the next
/// piece. Ends the game if the fresh piece cannot be placed.
fn lock_piece<R: Rng>(game: &mut TetrisGame, rng: &mut R) {
    for (row, cells) in game.current.shape.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 1 {
                let grid_x = (game.current.x + col as i32) as usize;
                let grid_y = (game.current.y + row as i32) as usize;
                game.grid[grid_y][grid_x] = game.current.kind;
            }
        }
    }

    let rows = clear_full_rows(&mut game.grid);
    if rows > 0 {
        game.score += POINTS_PER_ROW * rows;
        game.lines_cleared += rows;
        game.level = game.lines_cleared / LINES_PER_LEVEL + 1;
        game.gravity.set_interval(gravity_interval_ms(game.level));
    }

    game.current = Piece::from_kind(game.next.kind);
    game.next = Piece::random(rng);

    if !fits(&game.grid, &game.current.shape, game.current.x, game.current.y) {
        game.game_over = true;
        game.high_score = game.high_score.max(game.score);
    }
}

/// Remove every full row in one pass and pad the top with empty rows, so
/// rows above a clear drop by the full clear count at once.
pub fn clear_full_rows(grid: &mut Vec<Vec<u8>>) -> u32 {
    let before = grid.len();
    grid.retain(|row| row.iter().any(|&cell| cell == 0));
    let cleared = before - grid.len();

    for _ in 0..cleared {
        grid.insert(0, vec![0; GRID_WIDTH]);
    }

    cleared as u32
}

pub fn gravity_interval_ms(level: u32) -> u64 {
    BASE_GRAVITY_MS
        .saturating_sub(GRAVITY_STEP_MS * (level.saturating_sub(1)) as u64)
        .max(MIN_GRAVITY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_with_piece(kind: u8) -> TetrisGame {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = TetrisGame::new(0, &mut rng);
        game.current = Piece::from_kind(kind);
        game
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_rotate_cw_i_piece() {
        let rotated = rotate_cw(&SHAPES[0]);
        let expected = [
            [0, 0, 1, 0],
            [0, 0, 1, 0],
            [0, 0, 1, 0],
            [0, 0, 1, 0],
        ];
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for shape in &SHAPES {
            let mut rotated = *shape;
            for _ in 0..4 {
                rotated = rotate_cw(&rotated);
            }
            assert_eq!(&rotated, shape);
        }
    }

    #[test]
    fn test_o_piece_rotation_invariant() {
        assert_eq!(rotate_cw(&SHAPES[3]), SHAPES[3]);
    }

    #[test]
    fn test_move_clamped_by_walls() {
        let mut game = game_with_piece(1);
        let mut rng = rng();

        for _ in 0..20 {
            apply_action(&mut game, TetrisAction::MoveLeft, &mut rng);
        }
        // I occupies mask cols 0..4, so x bottoms out at 0
        assert_eq!(game.current.x, 0);

        for _ in 0..20 {
            apply_action(&mut game, TetrisAction::MoveRight, &mut rng);
        }
        assert_eq!(game.current.x, 6);
    }

    #[test]
    fn test_rotation_refused_when_blocked() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        // Locked cells under the flat I block the upright orientation,
        // which needs column 5 down through row 3
        for y in 2..4 {
            game.grid[y][5] = 7;
        }
        let before = game.current.shape;
        apply_action(&mut game, TetrisAction::Rotate, &mut rng);
        assert_eq!(game.current.shape, before);
    }

    #[test]
    fn test_tick_descends_then_locks() {
        let mut game = game_with_piece(1);
        let mut rng = rng();

        apply_action(&mut game, TetrisAction::Tick, &mut rng);
        assert_eq!(game.current.y, 1);

        // Flat I rests when its mask row 1 reaches the floor
        for _ in 0..17 {
            apply_action(&mut game, TetrisAction::Tick, &mut rng);
        }
        assert_eq!(game.current.y, 18);

        apply_action(&mut game, TetrisAction::Tick, &mut rng);
        // Locked into the bottom row with its kind id
        for col in 3..7 {
            assert_eq!(game.grid[19][col], 1);
        }
        // And a fresh piece took over
        assert_eq!(game.current.y, SPAWN_Y);
    }

    #[test]
    fn test_single_row_clear_scores_100() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        for col in (0..3).chain(7..10) {
            game.grid[19][col] = 2;
        }

        apply_action(&mut game, TetrisAction::HardDrop, &mut rng);

        assert_eq!(game.score, 100);
        assert_eq!(game.lines_cleared, 1);
        assert_eq!(game.level, 1);
        // The cleared row is gone and nothing remains on the floor
        assert!(game.grid[19].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_double_row_clear_is_atomic() {
        let mut game = game_with_piece(4);
        let mut rng = rng();
        // Rows 18 and 19 full except the O's landing columns 4 and 5,
        // with a marker block above that must fall two rows
        for col in (0..4).chain(6..10) {
            game.grid[18][col] = 2;
            game.grid[19][col] = 2;
        }
        game.grid[17][0] = 5;

        apply_action(&mut game, TetrisAction::HardDrop, &mut rng);

        assert_eq!(game.score, 200);
        assert_eq!(game.lines_cleared, 2);
        assert_eq!(game.grid[19][0], 5);
        assert!(game.grid[18].iter().all(|&c| c == 0));
        assert!(game.grid[17].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_level_and_gravity_advance_every_ten_lines() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        game.lines_cleared = 9;
        for col in (0..3).chain(7..10) {
            game.grid[19][col] = 2;
        }

        apply_action(&mut game, TetrisAction::HardDrop, &mut rng);

        assert_eq!(game.lines_cleared, 10);
        assert_eq!(game.level, 2);
        assert_eq!(game.gravity.interval_ms(), 750);
    }

    #[test]
    fn test_gravity_floor() {
        assert_eq!(gravity_interval_ms(1), 800);
        assert_eq!(gravity_interval_ms(2), 750);
        assert_eq!(gravity_interval_ms(15), 100);
        assert_eq!(gravity_interval_ms(100), 100);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        game.score = 300;
        game.high_score = 100;
        // Block the spawn columns (without completing any row) so the
        // promoted piece cannot be placed
        for y in 0..4 {
            for x in 3..7 {
                game.grid[y][x] = 3;
            }
        }
        game.current.y = 16;

        apply_action(&mut game, TetrisAction::HardDrop, &mut rng);

        assert!(game.game_over);
        assert_eq!(game.high_score, 300);
    }

    #[test]
    fn test_pause_gates_everything_but_resume() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        apply_action(&mut game, TetrisAction::TogglePause, &mut rng);
        assert!(game.paused);

        apply_action(&mut game, TetrisAction::MoveLeft, &mut rng);
        apply_action(&mut game, TetrisAction::Tick, &mut rng);
        assert_eq!((game.current.x, game.current.y), (SPAWN_X, SPAWN_Y));

        tick_tetris(&mut game, 5000, &mut rng);
        assert_eq!(game.current.y, SPAWN_Y);

        apply_action(&mut game, TetrisAction::TogglePause, &mut rng);
        assert!(!game.paused);
    }

    #[test]
    fn test_gravity_cadence_drives_ticks() {
        let mut game = game_with_piece(1);
        let mut rng = rng();

        // 49 frames of 16ms bank 784ms: not yet a drop
        for _ in 0..49 {
            tick_tetris(&mut game, 16, &mut rng);
        }
        assert_eq!(game.current.y, 0);

        tick_tetris(&mut game, 16, &mut rng);
        assert_eq!(game.current.y, 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        // A 10s stall counts as one 100ms frame, far below one interval
        tick_tetris(&mut game, 10_000, &mut rng);
        assert_eq!(game.current.y, 0);
    }

    #[test]
    fn test_restart_preserves_high_score() {
        let mut game = game_with_piece(1);
        let mut rng = rng();
        game.score = 400;
        game.high_score = 900;
        game.game_over = true;

        apply_action(&mut game, TetrisAction::Restart, &mut rng);

        assert!(!game.game_over);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 900);
        assert_eq!(game.gravity.interval_ms(), BASE_GRAVITY_MS);
    }
}
