//! Snake scene rendering.
//!
//! Uses half-block pixel rendering for smooth visuals. Each arena cell maps
//! to a colored pixel; pairs of vertical pixels are packed into one terminal
//! row using the `▀` (upper half block) character with fg=top, bg=bottom.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_pause_overlay,
    render_status_bar, GameResultType,
};
use crate::games::snake::types::{ARENA_SIZE, STEP_INTERVAL_MS};
use crate::games::{SnakeGame, SnakeStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀ (fg top half, bg bottom half)
const FULL_BLOCK: char = '\u{2588}'; // █

// ── Snake gradient colors ────────────────────────────────────────────
const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_COLOR: Color = Color::Rgb(255, 80, 40);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);

/// Render the snake scene.
pub fn render_snake(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    let layout = create_game_layout(frame, area, " Snake ", Color::LightGreen, 12, 18);

    render_play_field(frame, layout.content, game);

    match game.status {
        SnakeStatus::Paused => render_pause_overlay(frame, layout.content),
        SnakeStatus::GameOver => {
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Loss,
                "GAME OVER",
                &format!("{} points", game.score),
            );
        }
        SnakeStatus::Playing => {}
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Interpolated RGB color for a body segment, bright at the head end.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Render the arena using half-block pixel rendering.
///
/// Each arena cell becomes a colored "pixel". Two vertical pixels are packed
/// into one terminal row via `▀` (fg = top pixel, bg = bottom pixel); one
/// terminal column per cell keeps the aspect ratio close to square.
fn render_play_field(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let grid = ARENA_SIZE as usize;
    let border_color = Color::Rgb(80, 80, 80);

    // ── Build color grid (arena coordinates) ────────────────────
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid]; grid];

    let fx = game.food.x as usize;
    let fy = game.food.y as usize;
    if fx < grid && fy < grid {
        pixels[fy][fx] = Some(FOOD_COLOR);
    }

    // Snake (head bright, body gradient)
    let snake_len = game.snake.len();
    for (i, seg) in game.snake.iter().enumerate() {
        let sx = seg.x as usize;
        let sy = seg.y as usize;
        if sx < grid && sy < grid {
            pixels[sy][sx] = Some(if i == 0 {
                HEAD_COLOR
            } else {
                body_color(i, snake_len)
            });
        }
    }

    // ── Layout dimensions ───────────────────────────────────────
    let content_rows = grid.div_ceil(2); // 2 arena rows per terminal row
    let render_w = ((grid + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2; // chars between left/right border

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // ── Row 0: Top border with score ────────────────────────────
    {
        let score_val = game.score.to_string();
        let label = "Score: ";
        let score_full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_full_len);

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            BORDER_TL.to_string(),
            Style::default().fg(border_color),
        ));
        if pad_before > 0 {
            let s: String = std::iter::repeat_n(BORDER_H, pad_before).collect();
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(label, Style::default().fg(border_color)));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            let s: String = std::iter::repeat_n(BORDER_H, pad_after).collect();
            spans.push(Span::styled(s, Style::default().fg(border_color)));
        }
        spans.push(Span::styled(
            BORDER_TR.to_string(),
            Style::default().fg(border_color),
        ));

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, y_off, render_w, 1));
    }

    // ── Arena rows (half-block pixel rendering) ─────────────────
    for term_row in 0..content_rows {
        let top_gy = term_row * 2;
        let bot_gy = term_row * 2 + 1;

        let mut spans: Vec<Span> = Vec::new();

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for gx in 0..grid {
            // ▀ uses fg for top half, bg for bottom half
            let fg = pixels[top_gy][gx].unwrap_or(EMPTY_BG);
            let bg = if bot_gy < grid {
                pixels[bot_gy][gx].unwrap_or(EMPTY_BG)
            } else {
                EMPTY_BG
            };

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(border_color),
        ));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    {
        let bot_y = y_off + 1 + content_rows as u16;
        if bot_y < area.y + area.height {
            let mut s = String::new();
            s.push(BORDER_BL);
            for _ in 0..inner_w {
                s.push(BORDER_H);
            }
            s.push(BORDER_BR);
            let line = Paragraph::new(Line::from(Span::styled(
                s,
                Style::default().fg(border_color),
            )));
            frame.render_widget(line, Rect::new(x_off, bot_y, render_w, 1));
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    let (text, color) = match game.status {
        SnakeStatus::Playing => ("Slither!", Color::Green),
        SnakeStatus::Paused => ("Paused", Color::Yellow),
        SnakeStatus::GameOver => ("Crashed", Color::Red),
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[Arrows]", "Steer"),
            ("[P]", "Pause"),
            ("[R]", "Restart"),
            ("[Q]", "Menu"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    let inner = render_info_panel_frame(frame, area);

    let lines: Vec<Line> = vec![
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
            Span::styled("Length: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.snake.len()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}ms", STEP_INTERVAL_MS),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(HEAD_COLOR)),
            Span::styled("Head", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(Color::Rgb(
                    BODY_BRIGHT.0 as u8,
                    BODY_BRIGHT.1 as u8,
                    BODY_BRIGHT.2 as u8,
                )),
            ),
            Span::styled("Body", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(FOOD_COLOR)),
            Span::styled("Food", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}
