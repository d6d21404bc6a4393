//! Status bar view
//!
//! Shows the month balance, the latest status message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::money;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let balance = app.overview().balance();
    let balance_color = if balance.is_negative() { Color::Red } else { Color::Green };

    let mut spans = vec![
        Span::styled(" Balance: ", Style::default().fg(Color::White)),
        Span::styled(
            money(balance, app.settings),
            Style::default().fg(balance_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(app.state.month.to_string(), Style::default().fg(Color::Cyan)),
    ];

    if let Some(ref message) = app.state.status {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = " q:Quit  ?:Help ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
