//! Cabinet select menu.

use super::game_common::format_timer;
use crate::app::{MenuBests, MenuState};
use crate::games::GameId;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the game-select menu.
pub fn render_menu(frame: &mut Frame, area: Rect, menu: &MenuState) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Coin-Op Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Banner
            Constraint::Min(7),    // Game list
            Constraint::Length(2), // Footer
        ])
        .split(inner);

    render_banner(frame, chunks[0]);
    render_game_list(frame, chunks[1], menu);
    render_footer(frame, chunks[2], menu);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "C O I N - O P   A R C A D E",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "five games, one cabinet",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let banner = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(banner, area);
}

/// Best-score text for a menu row.
fn best_text(id: GameId, menu: &MenuState) -> String {
    let bests = &menu.bests;
    match id {
        GameId::Minesweeper => {
            let secs = bests.minesweeper.get(menu.difficulty);
            if secs > 0 {
                format!("best {}", format_timer(secs))
            } else {
                String::new()
            }
        }
        GameId::Snake => score_text(bests.snake),
        GameId::Tetris => score_text(bests.tetris),
        GameId::Flappy => score_text(bests.flappy),
        GameId::Platformer => score_text(bests.platformer),
    }
}

fn score_text(score: u32) -> String {
    if score > 0 {
        format!("best {}", score)
    } else {
        String::new()
    }
}

fn render_game_list(frame: &mut Frame, area: Rect, menu: &MenuState) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, id) in GameId::ALL.iter().enumerate() {
        let selected = index == menu.selected;

        let marker = if selected { "▶ " } else { "  " };
        let title_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<14}", id.title()), title_style),
        ];

        // Minesweeper row carries the difficulty picker
        if *id == GameId::Minesweeper {
            let picker_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!("◄ {:<6} ►  ", menu.difficulty.name()),
                picker_style,
            ));
        } else {
            spans.push(Span::raw("            "));
        }

        spans.push(Span::styled(
            best_text(*id, menu),
            Style::default().fg(Color::DarkGray),
        ));

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let list_width = 46u16.min(area.width);
    let x = area.x + area.width.saturating_sub(list_width) / 2;
    let list_area = Rect::new(x, area.y, list_width, area.height);

    let text = Paragraph::new(lines);
    frame.render_widget(text, list_area);
}

fn render_footer(frame: &mut Frame, area: Rect, menu: &MenuState) {
    let mut controls = vec![
        ("[↑↓]", "Select"),
        ("[Enter]", "Play"),
        ("[Q]", "Quit"),
    ];
    if GameId::ALL[menu.selected] == GameId::Minesweeper {
        controls.insert(1, ("[←→]", "Difficulty"));
    }

    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
