//! Modal overlays: help, clean confirmation, advice and messages

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::state::Modal;

const HELP: &[(&str, &str)] = &[
    ("←/h  →/l", "Previous / next month"),
    ("t", "Jump to this month"),
    ("Tab", "Permanent / temporary budgets"),
    ("↑/k  ↓/j", "Move selection"),
    ("a", "Ask the advisor"),
    ("e", "Export this month to CSV"),
    ("c", "Clean this month"),
    ("q", "Quit"),
];

fn block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn help_lines() -> Vec<Line<'static>> {
    HELP.iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect()
}

/// Render the active modal
pub fn render(frame: &mut Frame, modal: &Modal) {
    let (title, color, lines, width, height) = match modal {
        Modal::None => return,
        Modal::Help => {
            let lines = help_lines();
            let height = lines.len() as u16 + 2;
            (" Help ", Color::Cyan, lines, 50, height)
        }
        Modal::ConfirmClean(month) => (
            " Confirm ",
            Color::Yellow,
            vec![
                Line::from(""),
                Line::from(format!(
                    "Delete every transaction in {} and the temporary periods inside it?",
                    month
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[Y]", Style::default().fg(Color::Green)),
                    Span::raw(" Yes  "),
                    Span::styled("[N]", Style::default().fg(Color::Red)),
                    Span::raw(" No"),
                ]),
            ],
            56,
            8,
        ),
        Modal::Advice(advice) => {
            let mut lines = vec![Line::from(advice.analysis.clone()), Line::from("")];
            lines.extend(
                advice
                    .recommendations
                    .iter()
                    .filter(|r| !r.trim().is_empty())
                    .map(|r| Line::from(format!("• {}", r.trim()))),
            );
            (" Advice ", Color::Green, lines, 70, 20)
        }
        Modal::Message(message) => (
            " Notice ",
            Color::Yellow,
            vec![Line::from(""), Line::from(message.clone())],
            56,
            7,
        ),
    };

    let area = centered_rect_fixed(width, height, frame.area());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .block(block(title, color))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
