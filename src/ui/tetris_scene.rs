//! Tetris scene rendering.
//!
//! Each well cell is drawn 2 chars wide so the 10x20 well reads roughly
//! square. Locked cells keep the color of the piece that placed them via
//! the kind value stored in the grid.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_pause_overlay,
    render_status_bar, GameResultType,
};
use crate::games::tetris::types::{GRID_HEIGHT, GRID_WIDTH};
use crate::games::{Piece, TetrisGame};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘

/// Color for a piece kind (1..=7, order I, J, L, O, S, T, Z).
fn kind_color(kind: u8) -> Color {
    match kind {
        1 => Color::Cyan,
        2 => Color::Blue,
        3 => Color::Rgb(255, 165, 0),
        4 => Color::Yellow,
        5 => Color::Green,
        6 => Color::Magenta,
        _ => Color::Red,
    }
}

/// Render the tetris scene.
pub fn render_tetris(frame: &mut Frame, area: Rect, game: &TetrisGame) {
    let layout = create_game_layout(frame, area, " Tetris ", Color::Magenta, 12, 22);

    render_well(frame, layout.content, game);

    if game.paused {
        render_pause_overlay(frame, layout.content);
    } else if game.game_over {
        render_game_over_banner(
            frame,
            layout.content,
            GameResultType::Loss,
            "TOPPED OUT",
            &format!("{} points, {} lines", game.score, game.lines_cleared),
        );
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Render the well with the current piece overlaid.
fn render_well(frame: &mut Frame, area: Rect, game: &TetrisGame) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    // Composite the falling piece over the locked grid
    let mut cells = game.grid.clone();
    if !game.game_over {
        for (sy, row) in game.current.shape.iter().enumerate() {
            for (sx, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let gx = game.current.x + sx as i32;
                let gy = game.current.y + sy as i32;
                if gx >= 0 && gx < GRID_WIDTH as i32 && gy >= 0 && gy < GRID_HEIGHT as i32 {
                    cells[gy as usize][gx as usize] = game.current.kind;
                }
            }
        }
    }

    let inner_w = GRID_WIDTH * 2;
    let render_w = (inner_w + 2) as u16;
    let border_color = Color::Rgb(80, 80, 80);

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // Top border
    {
        let mut s = String::new();
        s.push(BORDER_TL);
        for _ in 0..inner_w {
            s.push(BORDER_H);
        }
        s.push(BORDER_TR);
        let line = Paragraph::new(Span::styled(s, Style::default().fg(border_color)));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    for (row_idx, row) in cells.iter().enumerate() {
        let row_y = y_off + 1 + row_idx as u16;
        if row_y >= area.y + area.height {
            break;
        }

        let mut spans = Vec::new();
        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));
        for &cell in row {
            if cell == 0 {
                spans.push(Span::styled("· ", Style::default().fg(Color::Rgb(40, 40, 50))));
            } else {
                spans.push(Span::styled("██", Style::default().fg(kind_color(cell))));
            }
        }
        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
    }

    // Bottom border
    {
        let bot_y = y_off + 1 + GRID_HEIGHT as u16;
        if bot_y < area.y + area.height {
            let mut s = String::new();
            s.push(BORDER_BL);
            for _ in 0..inner_w {
                s.push(BORDER_H);
            }
            s.push(BORDER_BR);
            let line = Paragraph::new(Span::styled(s, Style::default().fg(border_color)));
            frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &TetrisGame) {
    let (text, color) = if game.game_over {
        ("Topped out", Color::Red)
    } else if game.paused {
        ("Paused", Color::Yellow)
    } else {
        ("Stack!", Color::Green)
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[←→]", "Move"),
            ("[↑]", "Rotate"),
            ("[↓]", "Drop"),
            ("[Space]", "Slam"),
            ("[Q]", "Menu"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &TetrisGame) {
    let inner = render_info_panel_frame(frame, area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.high_score),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", game.level), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Lines: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.lines_cleared),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Next:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    lines.extend(preview_lines(&game.next));

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}

/// Mini 4x4 preview of the queued piece.
fn preview_lines(piece: &Piece) -> Vec<Line<'static>> {
    let color = kind_color(piece.kind);
    piece
        .shape
        .iter()
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            for &cell in row {
                if cell == 1 {
                    spans.push(Span::styled("██", Style::default().fg(color)));
                } else {
                    spans.push(Span::raw("  "));
                }
            }
            Line::from(spans)
        })
        .collect()
}
