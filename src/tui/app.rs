//! Application State Management
//!
//! Global state of the TUI: screen navigation, the account views, the edit
//! and confirmation modals, and the toast queue. Everything is mutated from
//! the event loop, one [`Event`] at a time.

use chrono::Utc;
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::account::{Account, AccountId};
use crate::client::BankClient;
use crate::config::AppConfig;
use crate::error::Error;
use crate::toast::{ToastId, ToastQueue, Toaster};
use crate::tui::components::account_form::{AccountForm, FormAction};
use crate::tui::components::modals::{
    confirmation_buttons, create_help_modal, modal_area, ModalState, ModalType,
};
use crate::tui::events::{AccountOperations, Event};
use crate::tui::screens::accounts::AccountsScreen;
use crate::tui::screens::new_account::NewAccountScreen;
use crate::tui::ui::edit_modal_area;
use crate::tui::utils::formatting::format_account_count;

/// Available screens in the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Accounts,
    NewAccount,
}

impl Screen {
    /// Get the display name for the screen
    pub fn display_name(&self) -> &'static str {
        match self {
            Screen::Accounts => "Comptes",
            Screen::NewAccount => "Nouveau compte",
        }
    }

    /// Function key that opens the screen
    pub fn key_hint(&self) -> &'static str {
        match self {
            Screen::Accounts => "F2",
            Screen::NewAccount => "F3",
        }
    }

    pub fn all() -> Vec<Screen> {
        vec![Screen::Accounts, Screen::NewAccount]
    }
}

/// Screen-independent UI state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current_screen: Screen,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub modal_state: Option<ModalState>,
    pub should_quit: bool,
}

/// Account being edited in the modal form
#[derive(Debug, Clone)]
pub struct EditState {
    pub id: AccountId,
    pub form: AccountForm,
    submitting: bool,
}

impl EditState {
    pub fn new(account: &Account) -> Self {
        Self {
            id: account.id,
            form: AccountForm::from_account(account, "Enregistrer", "Enregistrement..."),
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

pub struct App {
    pub state: AppState,
    pub accounts: AccountsScreen,
    pub new_account: NewAccountScreen,
    pub edit: Option<EditState>,
    pub toasts: ToastQueue,
    /// Terminal size at the last draw
    pub(crate) viewport: Rect,
    /// Toast areas drawn by the last frame
    pub(crate) toast_hits: Vec<(ToastId, Rect)>,
    pending_delete: Option<AccountId>,
    toaster: Toaster,
    operations: AccountOperations,
}

impl App {
    pub fn new(
        client: BankClient,
        config: &AppConfig,
        event_sender: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let toasts = ToastQueue::with_default_duration(config.toast_duration());
        let toaster = toasts.toaster();
        Self {
            state: AppState::default(),
            accounts: AccountsScreen::new(),
            new_account: NewAccountScreen::new(),
            edit: None,
            toasts,
            viewport: Rect::default(),
            toast_hits: Vec::new(),
            pending_delete: None,
            toaster,
            operations: AccountOperations::new(client, event_sender),
        }
    }

    /// Kick off the initial account listing
    pub fn start(&mut self) {
        self.set_status("BankHub - F1 pour l'aide, q pour quitter".to_string());
        self.refresh();
    }

    /// Refetch the account list from the server
    pub fn refresh(&mut self) {
        tracing::debug!("refreshing accounts");
        self.accounts.set_loading(true);
        self.operations.spawn_load();
    }

    pub fn pending_delete(&self) -> Option<AccountId> {
        self.pending_delete
    }

    /// Whether plain characters belong to a text field rather than shortcuts
    pub fn is_typing(&self) -> bool {
        if let Some(edit) = &self.edit {
            return edit.form.is_typing() || edit.form.has_popup();
        }
        match self.state.current_screen {
            Screen::Accounts => self.accounts.is_searching(),
            Screen::NewAccount => {
                self.new_account.form.is_typing() || self.new_account.form.has_popup()
            }
        }
    }

    /// Handle one event; returns `Ok(true)` when the application should quit.
    ///
    /// Errors are only returned for conditions the loop cannot recover from.
    pub fn handle_event(&mut self, event: Event) -> Result<bool, Error> {
        if event.is_api_response() {
            self.handle_api_response(event)?;
            return Ok(false);
        }

        match event {
            Event::Quit => {
                self.state.should_quit = true;
                return Ok(true);
            }
            Event::Resize(..) => return Ok(false),
            Event::Mouse { column, row } => {
                self.handle_click(column, row)?;
                return Ok(false);
            }
            _ => {}
        }

        self.state.error_message = None;

        if self.state.modal_state.is_some() {
            self.handle_modal_event(&event);
            return Ok(false);
        }

        if self.edit.is_some() {
            self.handle_edit_event(&event)?;
            return Ok(false);
        }

        if self.handle_global_event(&event) {
            return Ok(self.state.should_quit);
        }

        match self.state.current_screen {
            Screen::Accounts => self.handle_accounts_event(&event),
            Screen::NewAccount => {
                let action = self.new_account.handle_event(&event);
                self.handle_new_account_action(action)?;
            }
        }

        Ok(self.state.should_quit)
    }

    fn handle_global_event(&mut self, event: &Event) -> bool {
        let typing = self.is_typing();
        match event {
            Event::Help => self.show_help(),
            Event::Char('?') if !typing => self.show_help(),
            Event::F(2) => self.navigate_to(Screen::Accounts),
            Event::F(3) => self.navigate_to(Screen::NewAccount),
            Event::Char('n') if !typing => self.navigate_to(Screen::NewAccount),
            Event::Refresh => self.refresh(),
            Event::Char('r') if !typing => self.refresh(),
            Event::Char('q') if !typing => self.state.should_quit = true,
            Event::Char('x') if !typing => {
                self.dismiss_latest_toast();
            }
            _ => return false,
        }
        true
    }

    fn handle_accounts_event(&mut self, event: &Event) {
        if self.accounts.is_searching() {
            self.accounts.handle_search_event(event);
            return;
        }

        match event {
            Event::Up => self.accounts.select_previous(),
            Event::Down => self.accounts.select_next(),
            Event::Char('/') => self.accounts.focus_search(),
            Event::Escape => self.accounts.reset_search(),
            Event::Char('e') | Event::Enter => self.open_edit(),
            Event::Char('d') | Event::Delete => self.confirm_delete(),
            _ => {}
        }
    }

    fn handle_new_account_action(&mut self, action: FormAction) -> Result<(), Error> {
        match action {
            FormAction::Submit => self.submit_new_account(),
            FormAction::Cancel => {
                self.navigate_to(Screen::Accounts);
                Ok(())
            }
            FormAction::Changed(change) => {
                tracing::trace!(field = %change.target.name, value = %change.target.value, "form change");
                Ok(())
            }
            FormAction::None => Ok(()),
        }
    }

    fn submit_new_account(&mut self) -> Result<(), Error> {
        match self.new_account.begin_submit() {
            Ok(Some(draft)) => {
                tracing::info!(solde = draft.solde, "creating account");
                self.set_status("Creation du compte...".to_string());
                self.operations.spawn_create(draft);
                Ok(())
            }
            Ok(None) => {
                tracing::debug!("create already in flight, submit ignored");
                Ok(())
            }
            Err(Error::Validation(message)) => {
                self.set_error(message);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn open_edit(&mut self) {
        if let Some(account) = self.accounts.selected_account() {
            tracing::debug!(id = account.id, "editing account");
            self.edit = Some(EditState::new(account));
        }
    }

    /// Close the edit modal unless a save is in flight
    pub fn close_edit(&mut self) {
        if self.edit.as_ref().is_some_and(|e| !e.submitting) {
            self.edit = None;
        }
    }

    fn handle_edit_event(&mut self, event: &Event) -> Result<(), Error> {
        let Some(edit) = self.edit.as_mut() else {
            return Ok(());
        };
        let action = edit.form.handle_event(event);
        self.handle_edit_action(action);
        Ok(())
    }

    fn handle_edit_action(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => self.submit_edit(),
            FormAction::Cancel => self.close_edit(),
            FormAction::Changed(_) | FormAction::None => {}
        }
    }

    fn submit_edit(&mut self) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        if edit.submitting {
            return;
        }
        match edit.form.to_draft() {
            Ok(draft) => {
                tracing::info!(id = edit.id, "updating account");
                edit.submitting = true;
                edit.form.set_busy(true);
                self.operations.spawn_update(edit.id, draft);
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.accounts.selected_account().map(|a| a.id) else {
            return;
        };
        self.pending_delete = Some(id);
        self.state.modal_state = Some(ModalState::confirmation(
            "Supprimer le compte",
            "Voulez-vous vraiment supprimer ce compte ?",
            Some("Supprimer".to_string()),
            Some("Annuler".to_string()),
        ));
    }

    pub fn handle_modal_event(&mut self, event: &Event) -> bool {
        let Some(modal) = self.state.modal_state.as_mut() else {
            return false;
        };
        match event {
            Event::Up => modal.scroll_up(),
            Event::Down => modal.scroll_down(),
            Event::Left => modal.select_previous(),
            Event::Right => modal.select_next(),
            Event::Tab => {
                if modal.is_confirmed() {
                    modal.select_next();
                } else {
                    modal.select_previous();
                }
            }
            Event::Enter => {
                let confirmed = matches!(modal.modal_type, ModalType::Confirmation { .. })
                    && modal.is_confirmed();
                self.close_modal(confirmed);
            }
            Event::Escape | Event::Help | Event::Char('q') => self.close_modal(false),
            Event::Char('?') => self.close_modal(false),
            _ => return false,
        }
        true
    }

    /// Close the current modal; a confirmed delete is sent off first
    fn close_modal(&mut self, confirmed: bool) {
        self.state.modal_state = None;
        if let Some(id) = self.pending_delete.take() {
            if confirmed {
                tracing::info!(id, "deleting account");
                self.operations.spawn_delete(id);
            } else {
                self.set_status("Suppression annulee".to_string());
            }
        }
    }

    /// Dismiss the most recent toast, if any
    pub fn dismiss_latest_toast(&mut self) -> bool {
        match self.toasts.toasts().last().map(|t| t.id) {
            Some(id) => self.toasts.dismiss(id),
            None => false,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Result<(), Error> {
        let pos = Position::new(column, row);

        // Toasts are drawn on top of everything else
        let toast_hit = self
            .toast_hits
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id);
        if let Some(id) = toast_hit {
            self.toast_hits.retain(|(hit, _)| *hit != id);
            if self.toasts.dismiss(id) {
                return Ok(());
            }
        }

        if let Some(modal) = self.state.modal_state.as_ref() {
            let area = modal_area(modal, self.viewport);
            let outcome = match modal.modal_type {
                ModalType::Confirmation { .. } => {
                    let (confirm, cancel) = confirmation_buttons(area);
                    if confirm.contains(pos) {
                        Some(true)
                    } else if cancel.contains(pos) || !area.contains(pos) {
                        Some(false)
                    } else {
                        None
                    }
                }
                ModalType::Help { .. } => (!area.contains(pos)).then_some(false),
            };
            if let Some(confirmed) = outcome {
                self.close_modal(confirmed);
            }
            return Ok(());
        }

        if let Some(edit) = self.edit.as_mut() {
            // A press outside the modal closes it, unless it only dismisses a popup
            if !edit_modal_area(self.viewport).contains(pos) && !edit.form.has_popup() {
                self.close_edit();
                return Ok(());
            }
            let action = edit.form.handle_click(column, row);
            self.handle_edit_action(action);
            return Ok(());
        }
        match self.state.current_screen {
            Screen::Accounts => {
                self.accounts.handle_click(column, row);
                Ok(())
            }
            Screen::NewAccount => {
                let action = self.new_account.handle_click(column, row);
                self.handle_new_account_action(action)
            }
        }
    }

    fn handle_api_response(&mut self, event: Event) -> Result<(), Error> {
        let now = Utc::now();
        match event {
            Event::AccountsLoaded(Ok(accounts)) => {
                tracing::info!(count = accounts.len(), "accounts loaded");
                let count = accounts.len();
                self.accounts.set_accounts(accounts, now);
                self.set_status(format!("{} charges", format_account_count(count)));
            }
            Event::AccountsLoaded(Err(message)) => {
                self.accounts.set_loading(false);
                self.state.error_message = Some(message);
                self.toaster.error("Impossible de charger les comptes")?;
            }
            Event::AccountCreated(Ok(account)) => {
                tracing::info!(id = account.id, "account created");
                self.new_account.finish_submit(true);
                self.accounts.upsert(account, now);
                self.toaster.success("Compte cree avec succes")?;
                self.refresh();
            }
            Event::AccountCreated(Err(_)) => {
                self.new_account.finish_submit(false);
                self.toaster.error("Erreur lors de la creation du compte")?;
            }
            Event::AccountUpdated {
                id,
                result: Ok(account),
            } => {
                tracing::info!(id, "account updated");
                if self.edit.as_ref().is_some_and(|e| e.id == id) {
                    self.edit = None;
                }
                self.accounts.upsert(account, now);
                self.toaster.success("Compte mis a jour")?;
                self.refresh();
            }
            Event::AccountUpdated { id, result: Err(_) } => {
                if let Some(edit) = self.edit.as_mut().filter(|e| e.id == id) {
                    edit.submitting = false;
                    edit.form.set_busy(false);
                }
                self.toaster.error("Impossible de mettre a jour le compte")?;
            }
            Event::AccountDeleted { id, result: Ok(()) } => {
                tracing::info!(id, "account deleted");
                self.accounts.remove(id, now);
                self.toaster.success("Compte supprime")?;
            }
            Event::AccountDeleted { result: Err(_), .. } => {
                self.toaster.error("Erreur lors de la suppression")?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Focus leaves the forms: close their calendar and type list
    fn close_form_popups(&mut self) {
        self.new_account.form.close_popups();
        if let Some(edit) = self.edit.as_mut() {
            edit.form.close_popups();
        }
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        self.close_form_popups();
        if self.state.current_screen != screen {
            self.state.status_message = None;
        }
        self.state.current_screen = screen;
    }

    pub fn show_help(&mut self) {
        self.close_form_popups();
        self.state.modal_state = Some(create_help_modal());
    }

    pub fn set_error(&mut self, message: String) {
        tracing::warn!(%message, "ui error");
        self.state.error_message = Some(message);
    }

    pub fn set_status(&mut self, message: String) {
        self.state.status_message = Some(message);
    }

    pub fn clear_messages(&mut self) {
        self.state.error_message = None;
        self.state.status_message = None;
    }
}
