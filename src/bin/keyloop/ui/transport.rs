//! Transport bar: tempo, position, key mode and voice count.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::app::App;

pub fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" keyloop ").borders(Borders::ALL);
    let status = &app.status;

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", app.config.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Bar {} | Beat {}  ", status.bar + 1, status.beat + 1),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:?}  ", app.config.mode),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("voices: {}  ", status.voices),
            Style::default().fg(if status.voices > 0 {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("{:.1}kHz  seed {}", app.sample_rate / 1000.0, app.config.seed),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
