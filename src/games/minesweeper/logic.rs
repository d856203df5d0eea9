//! Minesweeper rules: lazy mine placement, reveal/flood-fill, flags, timer.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::*;

/// UI-agnostic input actions for Minesweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinesweeperInput {
    Up,
    Down,
    Left,
    Right,
    Reveal,
    Flag,
    Start,
    TogglePause,
    Restart,
    Other,
}

/// Process player input. The board is live from the start: any gameplay
/// input while `Idle` begins the session (the clock still waits for the
/// first reveal).
pub fn process_input<R: Rng>(game: &mut MinesweeperGame, input: MinesweeperInput, rng: &mut R) {
    let gameplay = matches!(
        input,
        MinesweeperInput::Up
            | MinesweeperInput::Down
            | MinesweeperInput::Left
            | MinesweeperInput::Right
            | MinesweeperInput::Reveal
            | MinesweeperInput::Flag
            | MinesweeperInput::Start
    );
    if game.status == MinesweeperStatus::Idle && gameplay {
        game.status = MinesweeperStatus::Playing;
    }

    match input {
        MinesweeperInput::Start => {}
        MinesweeperInput::TogglePause => toggle_pause(game),
        MinesweeperInput::Restart => restart(game),
        MinesweeperInput::Up => {
            if game.status == MinesweeperStatus::Playing {
                game.move_cursor(-1, 0);
            }
        }
        MinesweeperInput::Down => {
            if game.status == MinesweeperStatus::Playing {
                game.move_cursor(1, 0);
            }
        }
        MinesweeperInput::Left => {
            if game.status == MinesweeperStatus::Playing {
                game.move_cursor(0, -1);
            }
        }
        MinesweeperInput::Right => {
            if game.status == MinesweeperStatus::Playing {
                game.move_cursor(0, 1);
            }
        }
        MinesweeperInput::Reveal => {
            let (row, col) = game.cursor;
            reveal_at(game, row, col, rng);
        }
        MinesweeperInput::Flag => {
            let (row, col) = game.cursor;
            flag_at(game, row, col);
        }
        MinesweeperInput::Other => {}
    }
}

/// `Playing` ⇄ `Paused`. Pausing clears the timer's banked fraction of a
/// second, matching an interval being torn down and re-created on resume.
pub fn toggle_pause(game: &mut MinesweeperGame) {
    match game.status {
        MinesweeperStatus::Playing => {
            game.status = MinesweeperStatus::Paused;
            game.clock.reset();
        }
        MinesweeperStatus::Paused => {
            game.status = MinesweeperStatus::Playing;
        }
        _ => {}
    }
}

/// Start a fresh session on the same board preset, keeping best times.
pub fn restart(game: &mut MinesweeperGame) {
    *game = MinesweeperGame::new(game.difficulty, game.best_times);
}

/// Advance the play clock. `dt_ms` is milliseconds since the last call.
/// Returns true if the displayed time changed.
pub fn tick_minesweeper(game: &mut MinesweeperGame, dt_ms: u64) -> bool {
    // The clock runs only while playing, and only once the opening reveal
    // has generated the board.
    if game.status != MinesweeperStatus::Playing || !game.grid_generated {
        return false;
    }

    game.clock.accumulate(dt_ms);
    let mut changed = false;

    while game.clock.try_consume() {
        // First-click grace: the opening second reports 0, not 1.
        if game.timer_grace_pending {
            game.timer_grace_pending = false;
        } else {
            game.timer_seconds += 1;
        }
        changed = true;
    }

    changed
}

/// Valid neighbor coordinates of a cell (up to 8).
pub fn get_neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for d_row in -1i32..=1 {
        for d_col in -1i32..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }

            let new_row = row as i32 + d_row;
            let new_col = col as i32 + d_col;

            if new_row >= 0 && new_row < rows as i32 && new_col >= 0 && new_col < cols as i32 {
                neighbors.push((new_row as usize, new_col as usize));
            }
        }
    }

    neighbors
}

/// Place mines by uniform sampling without replacement over every cell
/// except the one just revealed, so the opening move never detonates.
pub fn place_mines<R: Rng>(
    game: &mut MinesweeperGame,
    safe_row: usize,
    safe_col: usize,
    rng: &mut R,
) {
    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(game.rows * game.cols - 1);
    for row in 0..game.rows {
        for col in 0..game.cols {
            if (row, col) != (safe_row, safe_col) {
                candidates.push((row, col));
            }
        }
    }

    candidates.shuffle(rng);
    for &(row, col) in candidates.iter().take(game.total_mines as usize) {
        game.grid[row][col].has_mine = true;
    }
}

/// Fill in every non-mine cell's 8-neighborhood mine count.
pub fn calculate_adjacent_counts(game: &mut MinesweeperGame) {
    for row in 0..game.rows {
        for col in 0..game.cols {
            if game.grid[row][col].has_mine {
                continue;
            }

            let mut count = 0u8;
            for (n_row, n_col) in get_neighbors(row, col, game.rows, game.cols) {
                if game.grid[n_row][n_col].has_mine {
                    count += 1;
                }
            }

            game.grid[row][col].adjacent_mines = count;
        }
    }
}

/// Reveal the cell at (row, col). Out-of-bounds, non-playing status, and
/// flagged/revealed cells are all silent no-ops. The first reveal of a
/// session generates the board and starts the clock.
pub fn reveal_at<R: Rng>(game: &mut MinesweeperGame, row: usize, col: usize, rng: &mut R) {
    if game.status != MinesweeperStatus::Playing {
        return;
    }
    if row >= game.rows || col >= game.cols {
        return;
    }

    if !game.grid_generated {
        place_mines(game, row, col, rng);
        calculate_adjacent_counts(game);
        game.grid_generated = true;
        game.timer_grace_pending = true;
        game.clock.reset();
    }

    reveal_cell(game, row, col);
}

/// Reveal one generated cell and resolve the consequences.
pub fn reveal_cell(game: &mut MinesweeperGame, row: usize, col: usize) {
    let cell = &game.grid[row][col];
    if cell.flagged || cell.revealed {
        return;
    }

    game.grid[row][col].revealed = true;

    if game.grid[row][col].has_mine {
        game.status = MinesweeperStatus::GameOver;
        reveal_entire_grid(game);
        // A detonation wipes the stored best for this difficulty.
        game.best_times.set(game.difficulty, 0);
        return;
    }

    if game.grid[row][col].adjacent_mines == 0 {
        flood_fill_reveal(game, row, col);
    }

    check_win_condition(game);
}

/// Flood-fill outward from a zero-count cell with an explicit work stack.
///
/// Neighbors that are already revealed, flagged, or mined are skipped;
/// numbered cells are revealed but not expanded, so the fill is bounded by
/// the numbered frontier.
pub fn flood_fill_reveal(game: &mut MinesweeperGame, start_row: usize, start_col: usize) {
    let mut stack: Vec<(usize, usize)> = vec![(start_row, start_col)];

    while let Some((row, col)) = stack.pop() {
        for (n_row, n_col) in get_neighbors(row, col, game.rows, game.cols) {
            let neighbor = &game.grid[n_row][n_col];

            if neighbor.revealed || neighbor.flagged || neighbor.has_mine {
                continue;
            }

            game.grid[n_row][n_col].revealed = true;

            if game.grid[n_row][n_col].adjacent_mines == 0 {
                stack.push((n_row, n_col));
            }
        }
    }
}

/// Lay the whole board bare after a detonation. Flags come off so revealed
/// and flagged stay mutually exclusive.
pub fn reveal_entire_grid(game: &mut MinesweeperGame) {
    for row in 0..game.rows {
        for col in 0..game.cols {
            game.grid[row][col].revealed = true;
            game.grid[row][col].flagged = false;
        }
    }
    game.flags_placed = 0;
}

/// Toggle a flag at (row, col). Revealed cells cannot be flagged, and a new
/// flag is refused once the remaining-mine counter reads zero.
pub fn flag_at(game: &mut MinesweeperGame, row: usize, col: usize) {
    if game.status != MinesweeperStatus::Playing {
        return;
    }
    if row >= game.rows || col >= game.cols {
        return;
    }

    let cell = &game.grid[row][col];
    if cell.revealed {
        return;
    }

    if cell.flagged {
        game.grid[row][col].flagged = false;
        game.flags_placed -= 1;
    } else {
        if game.mines_remaining() == 0 {
            return;
        }
        game.grid[row][col].flagged = true;
        game.flags_placed += 1;
    }
}

/// Declare the win when every non-mine cell is revealed (equivalently, when
/// unrevealed count equals mine count). Fires at most once per session.
pub fn check_win_condition(game: &mut MinesweeperGame) {
    if game.status != MinesweeperStatus::Playing {
        return;
    }

    let mut unrevealed_count = 0u16;
    for row in 0..game.rows {
        for col in 0..game.cols {
            if !game.grid[row][col].revealed {
                unrevealed_count += 1;
            }
        }
    }

    if unrevealed_count == game.total_mines {
        game.status = MinesweeperStatus::Won;
        // Carried over from the original release: the stored "best" takes
        // the max of old and new even though the time is elapsed seconds.
        let previous = game.best_times.get(game.difficulty);
        game.best_times
            .set(game.difficulty, previous.max(game.timer_seconds));
    }
}
