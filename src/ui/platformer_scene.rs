//! Platformer scene rendering.
//!
//! Draws the camera window as a tile view, one tile per 2x1 terminal cell.
//! The camera already tracks the player with smoothing, so the scene only
//! snaps it to the tile grid.

use super::game_common::{
    create_game_layout, render_centered_prompt, render_game_over_banner, render_info_panel_frame,
    render_pause_overlay, render_status_bar, GameResultType,
};
use crate::games::platformer::types::{
    AnimationState, BOOST_MAX, ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_WIDTH, TILE_SIZE, VIEW_HEIGHT,
    VIEW_WIDTH,
};
use crate::games::{PlatformerGame, PlatformerStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashMap;

const SKY: Color = Color::Rgb(18, 24, 40);
const BRICK: Color = Color::Rgb(180, 100, 50);
const COIN: Color = Color::Yellow;
const ENEMY: Color = Color::Rgb(220, 60, 60);
const PLAYER: Color = Color::Cyan;
const FLAG: Color = Color::LightGreen;

/// Render the platformer scene.
pub fn render_platformer(frame: &mut Frame, area: Rect, game: &PlatformerGame) {
    let layout = create_game_layout(frame, area, " Platformer ", Color::LightRed, 14, 22);

    render_view(frame, layout.content, game);

    match game.status {
        PlatformerStatus::Idle => {
            render_centered_prompt(frame, layout.content, "[ Press Enter to start ]");
        }
        PlatformerStatus::Paused => render_pause_overlay(frame, layout.content),
        PlatformerStatus::LevelTransition => {
            render_centered_prompt(frame, layout.content, "[ LEVEL CLEAR! ]");
        }
        PlatformerStatus::GameOver => {
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Loss,
                "GAME OVER",
                &format!("{} points", game.score),
            );
        }
        PlatformerStatus::Victory => {
            render_game_over_banner(
                frame,
                layout.content,
                GameResultType::Win,
                "COURSE CLEAR",
                &format!("{} points", game.score),
            );
        }
        PlatformerStatus::Playing => {}
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Glyph for the player, by animation state.
fn player_glyph(game: &PlatformerGame) -> &'static str {
    match game.player.animation {
        AnimationState::Duck => "▄ ",
        AnimationState::Jump => "◓ ",
        AnimationState::Fall => "◒ ",
        AnimationState::Run => {
            if game.player.animation_frame % 2 == 0 {
                "◐ "
            } else {
                "◑ "
            }
        }
        AnimationState::Walk => {
            if game.player.animation_frame % 2 == 0 {
                "● "
            } else {
                "◍ "
            }
        }
        AnimationState::Idle => "● ",
    }
}

/// Render the camera window. One level tile becomes 2 terminal columns and
/// 1 terminal row.
fn render_view(frame: &mut Frame, area: Rect, game: &PlatformerGame) {
    let view_cols = (VIEW_WIDTH / TILE_SIZE) as i32; // 20
    let view_rows = (VIEW_HEIGHT / TILE_SIZE) as i32; // 14

    let start_col = (game.camera.x / TILE_SIZE).floor() as i32;
    let start_row = (game.camera.y / TILE_SIZE).floor() as i32;

    // Entity positions snapped to tiles, keyed (row, col)
    let mut overlays: HashMap<(i32, i32), (&'static str, Color)> = HashMap::new();

    for coin in &game.coins {
        let col = ((coin.x + TILE_SIZE / 2.0) / TILE_SIZE).floor() as i32;
        let row = ((coin.y + TILE_SIZE / 2.0) / TILE_SIZE).floor() as i32;
        overlays.insert((row, col), ("● ", COIN));
    }

    for enemy in game.enemies.iter().filter(|e| e.alive) {
        let col = ((enemy.pos.x + ENEMY_WIDTH / 2.0) / TILE_SIZE).floor() as i32;
        let row = ((enemy.pos.y + ENEMY_HEIGHT / 2.0) / TILE_SIZE).floor() as i32;
        overlays.insert((row, col), ("◣◢", ENEMY));
    }

    // Player drawn last so it always wins the cell
    let p = &game.player;
    let player_col = ((p.pos.x + PLAYER_WIDTH / 2.0) / TILE_SIZE).floor() as i32;
    let player_row = ((p.pos.y + p.height() / 2.0) / TILE_SIZE).floor() as i32;
    overlays.insert((player_row, player_col), (player_glyph(game), PLAYER));

    let flag_col = (game.level.flag_x / TILE_SIZE).floor() as i32;

    let mut lines = Vec::with_capacity(view_rows as usize);
    for vr in 0..view_rows {
        if vr as u16 >= area.height {
            break;
        }
        let row = start_row + vr;
        let mut spans = Vec::with_capacity(view_cols as usize);

        for vc in 0..view_cols {
            let col = start_col + vc;

            if let Some(&(glyph, color)) = overlays.get(&(row, col)) {
                spans.push(Span::styled(
                    glyph,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            } else if game.level.solid_at(row, col) {
                spans.push(Span::styled("██", Style::default().fg(BRICK)));
            } else if col == flag_col {
                // Goal flag: pole with a flag at the top of the window
                let glyph = if vr == 1 { "⚑ " } else { "│ " };
                spans.push(Span::styled(glyph, Style::default().fg(FLAG)));
            } else {
                spans.push(Span::styled("  ", Style::default().bg(SKY)));
            }
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &PlatformerGame) {
    let (text, color) = match game.status {
        PlatformerStatus::Idle => ("Ready", Color::Yellow),
        PlatformerStatus::Playing => ("Go!", Color::Green),
        PlatformerStatus::Paused => ("Paused", Color::Yellow),
        PlatformerStatus::LevelTransition => ("Level clear!", Color::Green),
        PlatformerStatus::GameOver => ("Game over", Color::Red),
        PlatformerStatus::Victory => ("Course clear!", Color::Green),
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[←→]", "Move"),
            ("[Space]", "Jump"),
            ("[X]", "Run"),
            ("[↓]", "Duck"),
            ("[Q]", "Menu"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &PlatformerGame) {
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
            Span::styled("World: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}-1", game.level_index + 1),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "♥ ".repeat(game.lives as usize),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", game.time_remaining),
                Style::default().fg(if game.time_remaining <= 30 {
                    Color::Red
                } else {
                    Color::White
                }),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Boost:",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    // Boost meter bar
    let bar_width = (inner.width as usize).saturating_sub(4).min(12);
    let filled = ((game.player.boost_meter / BOOST_MAX) * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
    ]));

    let text = Paragraph::new(lines);
    frame.render_widget(text, inner);
}
