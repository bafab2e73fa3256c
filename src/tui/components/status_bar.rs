//! Status Bar Component
//!
//! Bottom bar with the current status or error and the key hints for the
//! active screen.

use crate::tui::app::{AppState, Screen};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Render the status bar component
pub fn render_status_bar(f: &mut Frame, app_state: &AppState, loading: bool, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Status/message area
            Constraint::Percentage(55), // Shortcuts area
        ])
        .split(area);

    render_status_section(f, app_state, loading, status_chunks[0]);
    render_help_section(f, app_state, status_chunks[1]);
}

fn render_status_section(f: &mut Frame, app_state: &AppState, loading: bool, area: Rect) {
    let (text, color, title) = if let Some(error) = &app_state.error_message {
        (format!("❌ {}", error), Color::Red, "Erreur")
    } else if loading {
        ("⏳ Chargement...".to_string(), Color::Yellow, "Statut")
    } else if let Some(status) = &app_state.status_message {
        (status.clone(), Color::Blue, "Statut")
    } else {
        (
            format!("Pret | Ecran: {}", app_state.current_screen.display_name()),
            Color::Cyan,
            "Statut",
        )
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        ),
        area,
    );
}

fn render_help_section(f: &mut Frame, app_state: &AppState, area: Rect) {
    let help = Paragraph::new(get_context_help(app_state))
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title("Aide"),
        );
    f.render_widget(help, area);
}

/// Context-sensitive key hints for the current screen
pub fn get_context_help(app_state: &AppState) -> String {
    let base_help = "F1:Aide | q:Quitter";

    let screen_help = match app_state.current_screen {
        Screen::Accounts => "↑↓:Choisir | /:Rechercher | e:Modifier | d:Supprimer | r:Actualiser",
        Screen::NewAccount => "Tab:Champ suivant | Ctrl+S:Creer | Esc:Retour",
    };

    format!("{} | {}", screen_help, base_help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_context_help() {
        let mut app_state = AppState::default();

        app_state.current_screen = Screen::Accounts;
        assert!(get_context_help(&app_state).contains("/:Rechercher"));

        app_state.current_screen = Screen::NewAccount;
        assert!(get_context_help(&app_state).contains("Ctrl+S:Creer"));
    }
}
