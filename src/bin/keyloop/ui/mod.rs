//! Terminal view: transport on top, the key list in the middle, help below.

mod keys;
mod transport;

use keyloop::KeyMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    transport::render_transport(frame, chunks[0], app);
    keys::render_keys(frame, chunks[1], app);
    render_help(frame, chunks[2], app);
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let hint = match (app.voices.keymap().mode(), app.releases) {
        (KeyMode::Toggle, _) => "press a key to toggle its voice",
        (KeyMode::Hold, true) => "hold a key to play it",
        (KeyMode::Hold, false) => "no key releases here: notes ring until quit",
    };
    let text = match &app.message {
        Some(message) => format!(" {hint} | q/Esc quit | {message}"),
        None => format!(" {hint} | q/Esc quit"),
    };
    let help = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
