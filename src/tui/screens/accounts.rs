//! Accounts Screen Implementation
//!
//! Account list with search, row selection and the loading/empty states.

use chrono::{DateTime, Utc};
use ratatui::{layout::Position, prelude::*, widgets::TableState};
use tui_input::InputRequest;

use crate::account::{
    filter_accounts, remove_account, upsert_account, Account, AccountId, AccountSummary,
};
use crate::tui::components::forms::TextInput;
use crate::tui::components::tables::{render_accounts_table, TABLE_HEADER_ROWS};
use crate::tui::events::Event;
use crate::tui::utils::formatting::format_account_count;

/// State of the accounts list screen
#[derive(Debug, Clone)]
pub struct AccountsScreen {
    accounts: Vec<Account>,
    search: TextInput,
    table_state: TableState,
    loading: bool,
    summary: AccountSummary,
    table_area: Rect,
}

impl Default for AccountsScreen {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            search: TextInput::new("Rechercher").with_placeholder("Rechercher par ID ou type (/)"),
            table_state: TableState::default(),
            loading: false,
            summary: AccountSummary::default(),
            table_area: Rect::default(),
        }
    }
}

impl AccountsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn summary(&self) -> &AccountSummary {
        &self.summary
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the whole collection with a fresh server listing
    pub fn set_accounts(&mut self, accounts: Vec<Account>, now: DateTime<Utc>) {
        self.accounts = accounts;
        self.loading = false;
        self.refresh_summary(now);
    }

    pub fn upsert(&mut self, account: Account, now: DateTime<Utc>) {
        upsert_account(&mut self.accounts, account);
        self.refresh_summary(now);
    }

    pub fn remove(&mut self, id: AccountId, now: DateTime<Utc>) -> bool {
        let removed = remove_account(&mut self.accounts, id);
        if removed {
            self.refresh_summary(now);
        }
        removed
    }

    fn refresh_summary(&mut self, now: DateTime<Utc>) {
        self.summary = AccountSummary::from_accounts(&self.accounts, now);
        self.clamp_selection();
    }

    pub fn query(&self) -> &str {
        self.search.value()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_focused()
    }

    /// Accounts visible under the current search query
    pub fn filtered(&self) -> Vec<&Account> {
        filter_accounts(&self.accounts, self.search.value())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        let index = self.table_state.selected()?;
        self.filtered().get(index).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let prev = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(prev));
    }

    pub fn focus_search(&mut self) {
        self.search.set_focused(true);
    }

    /// Empty the query and leave the search box
    pub fn reset_search(&mut self) {
        self.search.clear();
        self.search.set_focused(false);
        self.clamp_selection();
    }

    /// Keys typed while the search box has focus; returns whether consumed
    pub fn handle_search_event(&mut self, event: &Event) -> bool {
        let request = match event {
            Event::Char(c) => InputRequest::InsertChar(*c),
            Event::Backspace => InputRequest::DeletePrevChar,
            Event::Delete => InputRequest::DeleteNextChar,
            Event::Left => InputRequest::GoToPrevChar,
            Event::Right => InputRequest::GoToNextChar,
            Event::Home => InputRequest::GoToStart,
            Event::End => InputRequest::GoToEnd,
            Event::Escape => {
                self.reset_search();
                return true;
            }
            Event::Enter | Event::Tab | Event::Down => {
                self.search.set_focused(false);
                return true;
            }
            _ => return false,
        };
        self.search.handle_input(request);
        self.clamp_selection();
        true
    }

    /// Select the row under a pointer press; returns whether a row was hit
    pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
        let area = self.table_area;
        if !area.contains(Position::new(column, row)) {
            return false;
        }
        let first_row = area.y + TABLE_HEADER_ROWS;
        if row < first_row || row + 1 >= area.bottom() {
            return false;
        }
        let index = (row - first_row) as usize + self.table_state.offset();
        if index < self.filtered().len() {
            self.table_state.select(Some(index));
            true
        } else {
            false
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }
}

/// Render the accounts screen content area
pub fn render_accounts(f: &mut Frame, screen: &mut AccountsScreen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Accounts table
        ])
        .split(area);

    let rows = filter_accounts(&screen.accounts, screen.search.value());
    screen
        .search
        .set_label(format!("Rechercher ({})", format_account_count(rows.len())));
    screen.search.render(f, chunks[0]);

    render_accounts_table(
        f,
        &rows,
        &mut screen.table_state,
        screen.loading,
        "Comptes bancaires",
        chunks[1],
    );
    screen.table_area = chunks[1];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountType;
    use ratatui::{backend::TestBackend, Terminal};

    fn account(id: AccountId, solde: f64, kind: Option<AccountType>) -> Account {
        Account {
            id,
            solde,
            date_creation: None,
            account_type: kind,
        }
    }

    fn sample() -> AccountsScreen {
        let mut screen = AccountsScreen::new();
        screen.set_accounts(
            vec![
                account(1, 100.0, Some(AccountType::Courant)),
                account(12, 250.5, Some(AccountType::Epargne)),
                account(3, 10.0, None),
            ],
            Utc::now(),
        );
        screen
    }

    #[test]
    fn test_set_accounts_updates_summary_and_selection() {
        let screen = sample();
        assert_eq!(screen.summary().total_accounts, 3);
        assert_eq!(screen.summary().total_balance, 360.5);
        assert!(screen.summary().last_update.is_some());
        assert_eq!(screen.selected_index(), Some(0));
    }

    #[test]
    fn test_search_filters_and_reset() {
        let mut screen = sample();
        screen.focus_search();
        for c in "epar".chars() {
            assert!(screen.handle_search_event(&Event::Char(c)));
        }
        assert_eq!(screen.filtered().len(), 1);
        assert_eq!(screen.selected_account().map(|a| a.id), Some(12));

        screen.handle_search_event(&Event::Escape);
        assert_eq!(screen.query(), "");
        assert!(!screen.is_searching());
        assert_eq!(screen.filtered().len(), 3);
    }

    #[test]
    fn test_selection_wraps() {
        let mut screen = sample();
        screen.select_previous();
        assert_eq!(screen.selected_index(), Some(2));
        screen.select_next();
        assert_eq!(screen.selected_index(), Some(0));
    }

    #[test]
    fn test_upsert_and_remove_keep_summary_current() {
        let mut screen = sample();
        screen.upsert(account(99, 1.0, None), Utc::now());
        assert_eq!(screen.accounts()[0].id, 99);
        assert_eq!(screen.summary().total_accounts, 4);

        assert!(screen.remove(1, Utc::now()));
        assert!(!screen.remove(1, Utc::now()));
        assert_eq!(screen.summary().total_accounts, 3);
    }

    #[test]
    fn test_click_selects_row() {
        let mut screen = sample();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| render_accounts(f, &mut screen, f.area()))
            .unwrap();

        // Search box takes 3 rows, then border and header
        assert!(screen.handle_click(10, 3 + TABLE_HEADER_ROWS + 1));
        assert_eq!(screen.selected_account().map(|a| a.id), Some(12));
        assert!(!screen.handle_click(10, 0));
    }

    #[test]
    fn test_render_shows_counter() {
        let mut screen = sample();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| render_accounts(f, &mut screen, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("3 comptes"));
        assert!(text.contains("250,50 MAD"));
    }
}
