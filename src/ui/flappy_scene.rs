//! Flappy Bird scene rendering.

use super::game_common::{
    create_game_layout, render_centered_prompt, render_game_over_banner, render_info_panel_frame,
    render_pause_overlay, render_status_bar, GameResultType,
};
use crate::games::flappy::types::{BIRD_X, CANVAS_HEIGHT, CANVAS_WIDTH, PIPE_GAP, PIPE_WIDTH};
use crate::games::{FlappyGame, FlappyStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the flappy scene.
pub fn render_flappy(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let layout = create_game_layout(frame, area, " Flappy Bird ", Color::Cyan, 10, 22);

    render_play_area(frame, layout.content, game);

    match game.status {
        FlappyStatus::Idle => {
            render_centered_prompt(frame, layout.content, "[ Press Space to flap ]");
        }
        FlappyStatus::Paused => render_pause_overlay(frame, layout.content),
        FlappyStatus::GameOver => {
            let reason = game
                .game_over_reason
                .map(|r| r.as_str())
                .unwrap_or("crashed");
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Loss,
                "SPLAT",
                &format!("You {} at {} points", reason, game.score),
            );
        }
        FlappyStatus::Playing => {}
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Render the play area, scaling canvas coordinates down to the terminal.
fn render_play_area(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let width = area.width as usize;
    let height = area.height as usize;

    if width == 0 || height == 0 {
        return;
    }

    let x_scale = width as f64 / CANVAS_WIDTH;
    let y_scale = height as f64 / CANVAS_HEIGHT;

    let bird_display_col = (BIRD_X * x_scale).round() as usize;
    let bird_display_row = (game.bird_y * y_scale).round() as usize;

    let bird_char = if game.velocity < -0.5 {
        "▲" // Flapping up
    } else if game.velocity > 1.0 {
        "▼" // Falling fast
    } else {
        "►"
    };

    let mut lines = Vec::with_capacity(height);

    for display_row in 0..height {
        let mut spans = Vec::new();

        for display_col in 0..width {
            if display_row == bird_display_row && display_col == bird_display_col {
                spans.push(Span::styled(
                    bird_char,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let game_x = display_col as f64 / x_scale;

            let mut glyph = Span::raw(" ");
            for pipe in &game.pipes {
                if game_x >= pipe.x && game_x < pipe.x + PIPE_WIDTH {
                    let gap_top_row = (pipe.gap_top() * y_scale).round() as usize;
                    let gap_bottom_row = ((pipe.gap_top() + PIPE_GAP) * y_scale).round() as usize;

                    if display_row < gap_top_row || display_row >= gap_bottom_row {
                        glyph = Span::styled("█", Style::default().fg(Color::Green));
                    } else if display_row == gap_top_row
                        || display_row + 1 == gap_bottom_row
                    {
                        glyph = Span::styled("░", Style::default().fg(Color::DarkGray));
                    }
                    break;
                }
            }
            spans.push(glyph);
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let (text, color) = match game.status {
        FlappyStatus::Idle => ("Press Space to start!", Color::Yellow),
        FlappyStatus::Playing => ("Flap!", Color::Green),
        FlappyStatus::Paused => ("Paused", Color::Yellow),
        FlappyStatus::GameOver => ("Crashed", Color::Red),
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[Space]", "Flap"),
            ("[P]", "Pause"),
            ("[R]", "Restart"),
            ("[Q]", "Menu"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.high_score),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("x{:.1}", game.speed_multiplier),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Pipes: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.pipes.len()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}
