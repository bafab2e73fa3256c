//! Header Component
//!
//! Application title, screen tabs and the account summary.

use crate::account::AccountSummary;
use crate::tui::app::Screen;
use crate::tui::utils::formatting::{format_last_update, format_mad};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Render the header component
pub fn render_header(f: &mut Frame, summary: &AccountSummary, current: Screen, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Title and tabs
            Constraint::Min(1),     // Spacer
            Constraint::Length(16), // Active accounts
            Constraint::Length(24), // Total balance
            Constraint::Length(22), // Last update
        ])
        .split(area);

    let tabs: Vec<Span> = Screen::all()
        .iter()
        .flat_map(|screen| {
            let style = if *screen == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [
                Span::styled(format!(" {} {} ", screen.key_hint(), screen.display_name()), style),
                Span::raw(" "),
            ]
        })
        .collect();

    let title = Paragraph::new(Line::from(tabs)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(Span::styled(
                " BankHub ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(title, header_chunks[0]);

    let stats = [
        ("Comptes actifs", summary.total_accounts.to_string(), Color::Cyan),
        ("Solde total", format_mad(summary.total_balance), Color::Green),
        (
            "Derniere mise a jour",
            format_last_update(summary.last_update),
            Color::White,
        ),
    ];

    for ((label, value, color), chunk) in stats.into_iter().zip(header_chunks[2..].iter()) {
        f.render_widget(
            Paragraph::new(value)
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Blue))
                        .title(label),
                ),
            *chunk,
        );
    }
}
