//! UI Rendering Logic
//!
//! Layers, bottom to top: header, active screen, status bar, the edit modal,
//! confirmation/help modals and finally the toasts.

use crate::tui::app::{App, Screen};
use crate::tui::components::header::render_header;
use crate::tui::components::modals::{centered_rect_fixed, render_modal};
use crate::tui::components::status_bar::render_status_bar;
use crate::tui::components::toast_layer::render_toasts;
use crate::tui::screens::accounts::render_accounts;
use crate::tui::screens::new_account::render_new_account;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Size of the edit modal
const EDIT_MODAL_WIDTH: u16 = 64;
const EDIT_MODAL_HEIGHT: u16 = 20;

/// Where the edit modal sits inside the terminal `area`
pub fn edit_modal_area(area: Rect) -> Rect {
    centered_rect_fixed(EDIT_MODAL_WIDTH, EDIT_MODAL_HEIGHT, area)
}

/// Main UI rendering function
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.viewport = size;
    app.toast_hits.clear();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_size_warning(frame, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(
        frame,
        app.accounts.summary(),
        app.state.current_screen,
        chunks[0],
    );

    match app.state.current_screen {
        Screen::Accounts => render_accounts(frame, &mut app.accounts, chunks[1]),
        Screen::NewAccount => render_new_account(frame, &mut app.new_account, chunks[1]),
    }

    let loading = app.accounts.is_loading() || app.new_account.is_submitting();
    render_status_bar(frame, &app.state, loading, chunks[2]);

    if let Some(edit) = app.edit.as_mut() {
        let area = edit_modal_area(size);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Modifier le compte #{} ", edit.id))
            .title_bottom(" Ctrl+S: enregistrer | Esc: fermer ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        edit.form.render(frame, inner);
    }

    if let Some(ref modal_state) = app.state.modal_state {
        render_modal(frame, modal_state, size);
    }

    app.toast_hits = render_toasts(frame, app.toasts.toasts(), size);
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let popup = centered_rect_fixed(area.width.min(50), area.height.min(7), area);
    let warning = Paragraph::new(vec![
        Line::from("Terminal trop petit"),
        Line::from(format!("Taille actuelle: {}x{}", area.width, area.height)),
        Line::from(format!("Minimum requis: {}x{}", MIN_WIDTH, MIN_HEIGHT)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(warning, popup);
}
