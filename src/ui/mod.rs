pub mod flappy_scene;
pub mod game_common;
pub mod menu_scene;
pub mod minesweeper_scene;
pub mod platformer_scene;
pub mod snake_scene;
pub mod tetris_scene;

use crate::app::App;
use crate::games::ActiveGame;
use ratatui::Frame;

/// Top-level draw dispatch: the menu, or whichever cabinet is live.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.size();

    match &app.active {
        Some(ActiveGame::Minesweeper(game)) => {
            minesweeper_scene::render_minesweeper(frame, area, game);
        }
        Some(ActiveGame::Snake(game)) => snake_scene::render_snake(frame, area, game),
        Some(ActiveGame::Tetris(game)) => tetris_scene::render_tetris(frame, area, game),
        Some(ActiveGame::Flappy(game)) => flappy_scene::render_flappy(frame, area, game),
        Some(ActiveGame::Platformer(game)) => {
            platformer_scene::render_platformer(frame, area, game);
        }
        None => menu_scene::render_menu(frame, area, &app.menu),
    }
}
