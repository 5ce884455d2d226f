//! One row per mapped key, lit while its voice is connected.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::app::App;

pub fn render_keys(frame: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Line> = app
        .voices
        .keymap()
        .iter()
        .map(|(key, instrument)| {
            let style = if app.voices.is_active(key) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(format!(" [{key}] "), style),
                Span::styled(instrument.to_string(), style),
            ])
        })
        .collect();

    let block = Block::default().title(" keys ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(rows).block(block), area);
}
