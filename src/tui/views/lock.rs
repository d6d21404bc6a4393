//! Lock screen
//!
//! PIN pad shown at start-up when a PIN is set

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::crypto::PIN_LENGTH;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the lock screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(36, 9, frame.area());

    let block = Block::default()
        .title(" Hearth ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let entered = app.state.pin_input.len();
    let dots: String = (0..PIN_LENGTH)
        .map(|i| if i < entered { "● " } else { "○ " })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from("Enter PIN"),
        Line::from(""),
        Line::from(Span::styled(
            dots.trim_end().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(ref message) = app.state.status {
        lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter to unlock, Esc to quit",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
