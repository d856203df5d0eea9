//! Minesweeper scene rendering.

use super::game_common::{
    create_game_layout, format_timer, render_centered_prompt, render_game_over_banner,
    render_info_panel_frame, render_pause_overlay, render_status_bar, GameResultType,
};
use crate::games::{Cell, MinesweeperGame, MinesweeperStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the minesweeper scene.
pub fn render_minesweeper(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    let layout = create_game_layout(frame, area, " Minesweeper ", Color::Yellow, 11, 24);

    render_grid(frame, layout.content, game);

    match game.status {
        MinesweeperStatus::Idle => {
            render_centered_prompt(frame, layout.content, "[ Move or reveal to begin ]");
        }
        MinesweeperStatus::Paused => render_pause_overlay(frame, layout.content),
        MinesweeperStatus::GameOver => {
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Loss,
                "BOOM",
                &format!("Mine hit at {}", format_timer(game.timer_seconds)),
            );
        }
        MinesweeperStatus::Won => {
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Win,
                "CLEARED",
                &format!("Swept in {}", format_timer(game.timer_seconds)),
            );
        }
        MinesweeperStatus::Playing => {}
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Render the minefield grid, centered in the content area.
fn render_grid(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    // Each cell is 2 chars wide, 1 char tall
    let grid_width = (game.cols * 2) as u16;
    let grid_height = game.rows as u16;

    let x_offset = area.x + (area.width.saturating_sub(grid_width)) / 2;
    let y_offset = area.y + (area.height.saturating_sub(grid_height)) / 2;

    let over = matches!(
        game.status,
        MinesweeperStatus::GameOver | MinesweeperStatus::Won
    );

    for row in 0..game.rows {
        if y_offset + row as u16 >= area.y + area.height {
            break;
        }
        let mut spans = Vec::new();

        for col in 0..game.cols {
            let cell = &game.grid[row][col];
            let is_cursor = game.cursor == (row, col);

            let (text, color) = cell_display(cell);

            let mut style = Style::default().fg(color);
            if is_cursor && !over {
                style = style.bg(Color::DarkGray);
            }

            spans.push(Span::styled(text, style));
        }

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(
            line,
            Rect::new(x_offset, y_offset + row as u16, grid_width, 1),
        );
    }
}

/// Display text and color for a cell.
fn cell_display(cell: &Cell) -> (&'static str, Color) {
    if cell.flagged && !cell.revealed {
        return ("F ", Color::Red);
    }

    if !cell.revealed {
        return ("# ", Color::Gray);
    }

    if cell.has_mine {
        return ("* ", Color::Red);
    }

    match cell.adjacent_mines {
        0 => (". ", Color::DarkGray),
        1 => ("1 ", Color::Blue),
        2 => ("2 ", Color::Green),
        3 => ("3 ", Color::Red),
        4 => ("4 ", Color::Magenta),
        5 => ("5 ", Color::Yellow),
        6 => ("6 ", Color::Cyan),
        7 => ("7 ", Color::Gray),
        _ => ("8 ", Color::White),
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    let (text, color) = match game.status {
        MinesweeperStatus::Idle => ("Ready", Color::Yellow),
        MinesweeperStatus::Playing => ("Sweeping...", Color::Green),
        MinesweeperStatus::Paused => ("Paused", Color::Yellow),
        MinesweeperStatus::GameOver => ("Mine triggered", Color::Red),
        MinesweeperStatus::Won => ("Board cleared!", Color::Green),
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Reveal"),
            ("[F]", "Flag"),
            ("[P]", "Pause"),
            ("[Q]", "Menu"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    let inner = render_info_panel_frame(frame, area);

    let best = game.best_times.get(game.difficulty);
    let best_text = if best > 0 {
        format_timer(best)
    } else {
        "-".to_string()
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.difficulty.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Grid: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}x{}", game.cols, game.rows),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Mines: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.total_mines),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Remaining: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.mines_remaining()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_timer(game.timer_seconds),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(best_text, Style::default().fg(Color::Yellow)),
        ]),
    ];

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}
