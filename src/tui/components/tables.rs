//! Data Display Components
//!
//! The accounts table with its loading and empty states.

use crate::account::Account;
use crate::tui::utils::formatting::{format_account_type, format_mad, format_optional_date};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

/// Message shown when no account matches the search
pub const EMPTY_ACCOUNTS_MESSAGE: &str = "Aucun compte ne correspond a votre recherche.";

/// Rows taken by the table border and header before the first data row
pub const TABLE_HEADER_ROWS: u16 = 2;

/// Render the accounts table; `loading` replaces the body with a spinner line
pub fn render_accounts_table(
    f: &mut Frame,
    accounts: &[&Account],
    state: &mut TableState,
    loading: bool,
    title: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(title);

    if loading && accounts.is_empty() {
        f.render_widget(
            Paragraph::new("⏳ Chargement des comptes...")
                .style(Style::default().fg(Color::Yellow))
                .block(block),
            area,
        );
        return;
    }

    if accounts.is_empty() {
        f.render_widget(
            Paragraph::new(EMPTY_ACCOUNTS_MESSAGE)
                .style(Style::default().fg(Color::Gray))
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Solde").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Date de creation").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Type").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().bg(Color::DarkGray));

    let rows: Vec<Row> = accounts
        .iter()
        .map(|account| {
            let type_cell = match account.account_type {
                Some(_) => Cell::from(format_account_type(account.account_type))
                    .style(Style::default().fg(Color::Cyan)),
                None => Cell::from(format_account_type(None))
                    .style(Style::default().fg(Color::DarkGray)),
            };
            Row::new(vec![
                Cell::from(format!("#{}", account.id)),
                Cell::from(Text::from(format_mad(account.solde)).alignment(Alignment::Right)),
                Cell::from(format_optional_date(account.date_creation)),
                type_cell,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ");

    f.render_stateful_widget(table, area, state);
}
