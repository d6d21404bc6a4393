//! Monthly summary view
//!
//! Income, expense and balance for the month, and a budget table for the
//! selected tree with category roll-ups and their subcategory lines.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::display::money;
use crate::models::Money;
use crate::tui::app::App;
use crate::tui::layout::SummaryLayout;
use crate::tui::state::TreeTab;

fn difference_color(difference: Money) -> Color {
    if difference.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}

/// Render the summary screen
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = SummaryLayout::new(area);
    let overview = app.overview();
    let settings = app.settings;

    // Header
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}: ", settings.income_label), Style::default().fg(Color::White)),
            Span::styled(money(overview.totals.income, settings), Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(format!("{}: ", settings.expense_label), Style::default().fg(Color::White)),
            Span::styled(money(overview.totals.expense, settings), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Balance: ", Style::default().fg(Color::White)),
            Span::styled(
                money(overview.balance(), settings),
                Style::default()
                    .fg(difference_color(overview.balance()))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(format!(" {} ", app.state.month))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, layout.header);

    // Tabs
    let tabs = Tabs::new(vec!["Permanent", "Temporary"])
        .select(match app.state.tab {
            TreeTab::Permanent => 0,
            TreeTab::Temporary => 1,
        })
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, layout.tabs);

    // Table
    let mut rows = Vec::new();
    for rollup in App::rollups(&overview, app.state.tab) {
        rows.push(
            Row::new(vec![
                Cell::from(rollup.category.clone()),
                Cell::from(money(rollup.budgeted, settings)),
                Cell::from(money(rollup.spent, settings)),
                Cell::from(money(rollup.difference, settings))
                    .style(Style::default().fg(difference_color(rollup.difference))),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        for line in &rollup.lines {
            rows.push(Row::new(vec![
                Cell::from(format!("  {}", line.key.subcategory)),
                Cell::from(money(line.budgeted, settings)),
                Cell::from(money(line.spent, settings)),
                Cell::from(money(line.difference, settings))
                    .style(Style::default().fg(difference_color(line.difference))),
            ]));
        }
    }

    let empty = rows.is_empty();
    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(
        Row::new(vec!["Category", "Budgeted", "Spent", "Difference"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL))
    .highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    if !empty {
        table_state.select(Some(app.state.selected));
    }
    frame.render_stateful_widget(table, layout.table, &mut table_state);
}
