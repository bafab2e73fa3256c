//! New Account Screen Implementation
//!
//! Creation form. The submit itself is spawned by the app; this screen only
//! tracks the form and whether a request is in flight.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::account::AccountDraft;
use crate::error::Error;
use crate::tui::components::account_form::{AccountForm, FormAction};
use crate::tui::events::Event;

pub const SUBMIT_LABEL: &str = "Creer un compte";
pub const BUSY_LABEL: &str = "Creation en cours...";

#[derive(Debug, Clone)]
pub struct NewAccountScreen {
    pub form: AccountForm,
    submitting: bool,
}

impl Default for NewAccountScreen {
    fn default() -> Self {
        Self {
            form: AccountForm::new(SUBMIT_LABEL, BUSY_LABEL),
            submitting: false,
        }
    }
}

impl NewAccountScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the form and mark a submit in flight.
    ///
    /// Returns `Ok(None)` while a previous submit has not completed yet.
    pub fn begin_submit(&mut self) -> Result<Option<AccountDraft>, Error> {
        if self.submitting {
            return Ok(None);
        }
        let draft = self.form.to_draft()?;
        self.submitting = true;
        self.form.set_busy(true);
        Ok(Some(draft))
    }

    /// Record the end of a submit; a successful one clears the form
    pub fn finish_submit(&mut self, success: bool) {
        self.submitting = false;
        self.form.set_busy(false);
        if success {
            self.form.reset();
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> FormAction {
        self.form.handle_event(event)
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> FormAction {
        self.form.handle_click(column, row)
    }
}

/// Render the new account screen content area
pub fn render_new_account(f: &mut Frame, screen: &mut NewAccountScreen, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title("Nouveau compte");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Intro
            Constraint::Min(0),    // Form
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new("Renseignez le solde, la date de creation et le type du compte.")
            .style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let form_area = Rect {
        width: chunks[1].width.min(60),
        ..chunks[1]
    };
    screen.form.render(f, form_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_submit_does_not_start() {
        let mut screen = NewAccountScreen::new();
        assert!(screen.begin_submit().is_err());
        assert!(!screen.is_submitting());
    }

    #[test]
    fn test_second_submit_ignored_while_in_flight() {
        let mut screen = NewAccountScreen::new();
        screen.handle_event(&Event::Char('5'));

        let draft = screen.begin_submit().unwrap();
        assert_eq!(draft.map(|d| d.solde), Some(5.0));
        assert!(screen.is_submitting());
        assert!(screen.form.is_busy());

        assert_eq!(screen.begin_submit().unwrap(), None);
    }

    #[test]
    fn test_finish_submit() {
        let mut screen = NewAccountScreen::new();
        screen.handle_event(&Event::Char('7'));
        screen.begin_submit().unwrap();

        screen.finish_submit(false);
        assert!(!screen.is_submitting());
        assert_eq!(screen.form.solde().value(), "7");

        screen.begin_submit().unwrap();
        screen.finish_submit(true);
        assert_eq!(screen.form.solde().value(), "");
    }
}
