use ratatui::{backend::TestBackend, Terminal};

use super::{account, test_app};
use crate::account::AccountType;
use crate::tui::app::App;
use crate::tui::events::Event;
use crate::tui::ui::render_ui;

fn draw(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| render_ui(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[tokio::test]
async fn renders_accounts_screen() {
    let (mut app, _rx) = test_app();
    app.handle_event(Event::AccountsLoaded(Ok(vec![account(
        7,
        1234.56,
        Some(AccountType::Courant),
    )])))
    .unwrap();

    let text = draw(&mut app, 120, 30);
    assert!(text.contains("Comptes actifs"));
    assert!(text.contains("1 234,56 MAD"));
    assert!(text.contains("#7"));
    assert!(text.contains("1 compte"));
}

#[tokio::test]
async fn renders_empty_state() {
    let (mut app, _rx) = test_app();
    app.handle_event(Event::AccountsLoaded(Ok(vec![]))).unwrap();
    let text = draw(&mut app, 120, 30);
    assert!(text.contains("Aucun compte ne correspond"));
    assert!(text.contains("0 comptes"));
}

#[tokio::test]
async fn renders_new_account_form() {
    let (mut app, _rx) = test_app();
    app.handle_event(Event::F(3)).unwrap();
    let text = draw(&mut app, 120, 30);
    assert!(text.contains("Solde (MAD)"));
    assert!(text.contains("Choisir une date"));
    assert!(text.contains("Creer un compte"));
}

#[tokio::test]
async fn renders_edit_modal_and_confirmation() {
    let (mut app, _rx) = test_app();
    app.handle_event(Event::AccountsLoaded(Ok(vec![account(7, 10.0, None)])))
        .unwrap();

    app.handle_event(Event::Char('e')).unwrap();
    assert!(draw(&mut app, 120, 30).contains("Modifier le compte #7"));

    app.handle_event(Event::Escape).unwrap();
    app.handle_event(Event::Char('d')).unwrap();
    let text = draw(&mut app, 120, 30);
    assert!(text.contains("Supprimer le compte"));
    assert!(text.contains("Annuler"));
}

#[tokio::test]
async fn renders_toasts_on_top() {
    let (mut app, _rx) = test_app();
    app.handle_event(Event::AccountsLoaded(Err("down".into())))
        .unwrap();
    app.toasts.process_pending();
    let text = draw(&mut app, 120, 30);
    assert!(text.contains("Impossible de charger les comptes"));
}

#[tokio::test]
async fn renders_size_warning_when_too_small() {
    let (mut app, _rx) = test_app();
    let text = draw(&mut app, 60, 20);
    assert!(text.contains("Terminal trop petit"));
}
