//! Tetris sessions through the action reducer and the gravity cadence:
//! deterministic piece sequences, a line clear driven purely by gravity
//! ticks, level speed-up, and stacking to a top-out.

use coin_op::games::tetris::types::{BASE_GRAVITY_MS, GRID_WIDTH, SPAWN_Y};
use coin_op::games::tetris::{apply_action, tick_tetris, TetrisAction};
use coin_op::games::{Piece, TetrisGame};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_piece_sequence_is_seed_deterministic() {
    let mut rng_a = ChaCha8Rng::seed_from_u64(5);
    let mut rng_b = ChaCha8Rng::seed_from_u64(5);
    let mut game_a = TetrisGame::new(0, &mut rng_a);
    let mut game_b = TetrisGame::new(0, &mut rng_b);

    let mut kinds_a = vec![game_a.current.kind, game_a.next.kind];
    let mut kinds_b = vec![game_b.current.kind, game_b.next.kind];

    for _ in 0..6 {
        apply_action(&mut game_a, TetrisAction::HardDrop, &mut rng_a);
        apply_action(&mut game_b, TetrisAction::HardDrop, &mut rng_b);
        kinds_a.push(game_a.next.kind);
        kinds_b.push(game_b.next.kind);
    }

    assert_eq!(kinds_a, kinds_b);
    assert!(kinds_a.iter().all(|&kind| (1..=7).contains(&kind)));
}

#[test]
fn test_gravity_ticks_carry_a_piece_to_a_line_clear() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut game = TetrisGame::new(0, &mut rng);
    game.current = Piece::from_kind(1);

    // Bottom row full except the flat I's landing columns 3..7
    for col in (0..3).chain(7..GRID_WIDTH) {
        game.grid[19][col] = 2;
    }

    // One gravity interval per descent row; the 19th lands and locks
    for _ in 0..19 {
        tick_tetris(&mut game, BASE_GRAVITY_MS, &mut rng);
    }

    assert_eq!(game.score, 100);
    assert_eq!(game.lines_cleared, 1);
    assert!(game.grid[19].iter().all(|&cell| cell == 0));
    // A fresh piece has been promoted to the spawn row
    assert_eq!(game.current.y, SPAWN_Y);
    assert!(!game.game_over);
}

#[test]
fn test_level_two_tightens_the_gravity_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut game = TetrisGame::new(0, &mut rng);
    game.current = Piece::from_kind(1);
    game.lines_cleared = 9;
    for col in (0..3).chain(7..GRID_WIDTH) {
        game.grid[19][col] = 2;
    }

    apply_action(&mut game, TetrisAction::HardDrop, &mut rng);
    assert_eq!(game.level, 2);
    assert_eq!(game.gravity.interval_ms(), 750);

    // 750ms now buys a descent that 749 does not
    let y = game.current.y;
    tick_tetris(&mut game, 749, &mut rng);
    assert_eq!(game.current.y, y);
    tick_tetris(&mut game, 1, &mut rng);
    assert_eq!(game.current.y, y + 1);
}

#[test]
fn test_stacking_in_place_tops_out() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut game = TetrisGame::new(55, &mut rng);

    // Every piece dropped straight down lands on the last: the center
    // columns fill while the flanks stay empty, so no row ever clears
    for _ in 0..40 {
        if game.game_over {
            break;
        }
        apply_action(&mut game, TetrisAction::HardDrop, &mut rng);
    }

    assert!(game.game_over);
    assert_eq!(game.score, 0);
    assert_eq!(game.lines_cleared, 0);
    assert_eq!(game.high_score, 55);
    // Flank columns were never touched
    assert!(game.grid.iter().all(|row| row[0] == 0 && row[9] == 0));

    // Dead boards ignore everything except restart
    let x = game.current.x;
    apply_action(&mut game, TetrisAction::MoveLeft, &mut rng);
    assert_eq!(game.current.x, x);

    apply_action(&mut game, TetrisAction::Restart, &mut rng);
    assert!(!game.game_over);
    assert_eq!(game.high_score, 55);
    assert!(game.grid.iter().all(|row| row.iter().all(|&cell| cell == 0)));
}
