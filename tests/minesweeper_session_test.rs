//! Full minesweeper sessions driven through the same seams the terminal
//! shell uses: `process_input` for keys, `tick_minesweeper` for elapsed
//! time, and the raw reveal/flag operations for targeted cells.
//!
//! Covered:
//! - The opening reveal generating the board and arming the clock
//! - A complete win, including the best-time slot update
//! - A complete loss baring the board and wiping the stored best
//! - Flags blocking the win until removed
//! - Board generation determinism under a fixed seed
//! - Restart recycling the session while best times survive

use coin_op::games::minesweeper::{flag_at, process_input, reveal_at, tick_minesweeper};
use coin_op::games::{
    BestTimes, MinesweeperDifficulty, MinesweeperGame, MinesweeperInput, MinesweeperStatus,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Fresh board already woken by an opening reveal at the cursor (4, 4).
fn opened_game(seed: u64, best_times: BestTimes) -> MinesweeperGame {
    let mut game = MinesweeperGame::new(MinesweeperDifficulty::Easy, best_times);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    process_input(&mut game, MinesweeperInput::Reveal, &mut rng);
    assert!(game.grid_generated);
    game
}

fn mine_cells(game: &MinesweeperGame) -> Vec<(usize, usize)> {
    let mut mines = Vec::new();
    for row in 0..game.rows {
        for col in 0..game.cols {
            if game.grid[row][col].has_mine {
                mines.push((row, col));
            }
        }
    }
    mines
}

/// Reveal every safe cell. The rng is never drawn from because the board
/// is already generated.
fn reveal_all_safe(game: &mut MinesweeperGame) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for row in 0..game.rows {
        for col in 0..game.cols {
            if !game.grid[row][col].has_mine {
                reveal_at(game, row, col, &mut rng);
            }
        }
    }
}

#[test]
fn test_opening_reveal_generates_board_and_arms_clock() {
    let mut game = MinesweeperGame::new(MinesweeperDifficulty::Easy, BestTimes::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    // The reveal itself wakes the idle board
    process_input(&mut game, MinesweeperInput::Reveal, &mut rng);

    assert_eq!(game.status, MinesweeperStatus::Playing);
    assert!(game.grid_generated);
    assert_eq!(mine_cells(&game).len(), 10);
    let (row, col) = game.cursor;
    assert!(game.grid[row][col].revealed);
    assert!(!game.grid[row][col].has_mine);

    // The first full second is the grace tick, then the clock counts
    tick_minesweeper(&mut game, 1000);
    assert_eq!(game.timer_seconds, 0);
    tick_minesweeper(&mut game, 1000);
    assert_eq!(game.timer_seconds, 1);
}

#[test]
fn test_win_session_records_elapsed_time() {
    let mut best = BestTimes::default();
    best.set(MinesweeperDifficulty::Easy, 2);
    let mut game = opened_game(7, best);

    // Grace second plus five counted seconds
    for _ in 0..6 {
        tick_minesweeper(&mut game, 1000);
    }
    assert_eq!(game.timer_seconds, 5);

    reveal_all_safe(&mut game);

    assert_eq!(game.status, MinesweeperStatus::Won);
    assert_eq!(game.best_times.get(MinesweeperDifficulty::Easy), 5);

    // The clock is dead after the win
    assert!(!tick_minesweeper(&mut game, 5000));
    assert_eq!(game.timer_seconds, 5);

    // Mines stay hidden on a won board
    for (row, col) in mine_cells(&game) {
        assert!(!game.grid[row][col].revealed);
    }
}

#[test]
fn test_win_session_keeps_higher_stored_best() {
    // The stored slot takes max(previous, elapsed), so a faster completion
    // does not replace a slower one. Legacy behavior, locked in.
    let mut best = BestTimes::default();
    best.set(MinesweeperDifficulty::Easy, 50);
    let mut game = opened_game(7, best);

    for _ in 0..4 {
        tick_minesweeper(&mut game, 1000);
    }
    assert_eq!(game.timer_seconds, 3);

    reveal_all_safe(&mut game);

    assert_eq!(game.status, MinesweeperStatus::Won);
    assert_eq!(game.best_times.get(MinesweeperDifficulty::Easy), 50);
}

#[test]
fn test_loss_session_bares_board_and_wipes_best() {
    let mut best = BestTimes::default();
    best.set(MinesweeperDifficulty::Easy, 31);
    let mut game = opened_game(9, best);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let (mine_row, mine_col) = mine_cells(&game)[0];
    reveal_at(&mut game, mine_row, mine_col, &mut rng);

    assert_eq!(game.status, MinesweeperStatus::GameOver);
    for row in &game.grid {
        for cell in row {
            assert!(cell.revealed);
            assert!(!cell.flagged);
        }
    }
    assert_eq!(game.best_times.get(MinesweeperDifficulty::Easy), 0);
    assert!(!tick_minesweeper(&mut game, 5000));
}

#[test]
fn test_flagged_safe_cell_blocks_win_until_cleared() {
    let mut game = opened_game(13, BestTimes::default());

    // Flag one safe, unrevealed cell away from the reveals
    let flagged = mine_cells(&game)
        .first()
        .map(|&(row, col)| {
            // A neighbor offset guaranteed in bounds on a 9x9 board
            ((row + 1) % 9, col)
        })
        .filter(|&(row, col)| !game.grid[row][col].has_mine && !game.grid[row][col].revealed);

    // Fall back to any hidden safe cell
    let (flag_row, flag_col) = flagged.unwrap_or_else(|| {
        for row in 0..9 {
            for col in 0..9 {
                let cell = &game.grid[row][col];
                if !cell.has_mine && !cell.revealed {
                    return (row, col);
                }
            }
        }
        unreachable!("a fresh board always has hidden safe cells");
    });

    flag_at(&mut game, flag_row, flag_col);
    reveal_all_safe(&mut game);

    // One safe cell is still hidden behind its flag
    assert_eq!(game.status, MinesweeperStatus::Playing);
    assert!(!game.grid[flag_row][flag_col].revealed);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    flag_at(&mut game, flag_row, flag_col);
    reveal_at(&mut game, flag_row, flag_col, &mut rng);

    assert_eq!(game.status, MinesweeperStatus::Won);
}

#[test]
fn test_same_seed_same_board() {
    let game_a = opened_game(77, BestTimes::default());
    let game_b = opened_game(77, BestTimes::default());
    assert_eq!(mine_cells(&game_a), mine_cells(&game_b));

    let game_c = opened_game(78, BestTimes::default());
    assert_ne!(mine_cells(&game_a), mine_cells(&game_c));
}

#[test]
fn test_restart_recycles_session_and_keeps_best_times() {
    let mut best = BestTimes::default();
    best.set(MinesweeperDifficulty::Easy, 2);
    let mut game = opened_game(7, best);
    reveal_all_safe(&mut game);
    assert_eq!(game.status, MinesweeperStatus::Won);
    let best_after_win = game.best_times;

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    process_input(&mut game, MinesweeperInput::Restart, &mut rng);

    assert_eq!(game.status, MinesweeperStatus::Idle);
    assert!(!game.grid_generated);
    assert_eq!(game.timer_seconds, 0);
    assert_eq!(game.best_times, best_after_win);

    // The recycled board is live again on the next gameplay input
    process_input(&mut game, MinesweeperInput::Down, &mut rng);
    assert_eq!(game.status, MinesweeperStatus::Playing);
}
