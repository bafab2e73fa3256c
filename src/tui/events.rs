//! Event Handling System
//!
//! Terminal input is polled on a background task and converted into [`Event`]s.
//! API calls run on spawned tasks through [`AccountOperations`] and report back
//! on the same channel, so the main loop handles everything one event at a time.

use crossterm::event::{
    self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::account::{Account, AccountDraft, AccountId};
use crate::client::BankClient;
use crate::error::Error;

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Quit,
    Tab,
    BackTab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function keys other than F1 and F5
    F(u8),
    Ctrl(char),
    /// F5
    Refresh,
    /// F1
    Help,
    /// Left button press at a terminal cell
    Mouse { column: u16, row: u16 },
    Resize(u16, u16),

    /// `GET /comptes` finished
    AccountsLoaded(Result<Vec<Account>, String>),
    /// `POST /comptes` finished
    AccountCreated(Result<Account, String>),
    /// `PUT /comptes/{id}` finished
    AccountUpdated {
        id: AccountId,
        result: Result<Account, String>,
    },
    /// `DELETE /comptes/{id}` finished
    AccountDeleted {
        id: AccountId,
        result: Result<(), String>,
    },
}

impl Event {
    /// Whether this event carries the outcome of an API call
    pub fn is_api_response(&self) -> bool {
        matches!(
            self,
            Event::AccountsLoaded(_)
                | Event::AccountCreated(_)
                | Event::AccountUpdated { .. }
                | Event::AccountDeleted { .. }
        )
    }
}

/// Event handler for processing terminal events
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    sender: mpsc::UnboundedSender<Event>,
    _terminal_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let event_sender = sender.clone();
        let terminal_task = tokio::spawn(async move {
            loop {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(terminal_event) = event::read() {
                        if let Some(app_event) = Self::convert_terminal_event(terminal_event) {
                            if event_sender.send(app_event).is_err() {
                                break; // Channel closed
                            }
                        }
                    }
                }

                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        Self {
            receiver,
            sender,
            _terminal_task: terminal_task,
        }
    }

    /// Sender for events produced outside the terminal (API results)
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    fn convert_terminal_event(terminal_event: event::Event) -> Option<Event> {
        match terminal_event {
            event::Event::Key(key_event) => Self::convert_key_event(key_event),
            event::Event::Mouse(mouse_event) => Self::convert_mouse_event(mouse_event),
            event::Event::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }

    fn convert_mouse_event(mouse_event: MouseEvent) -> Option<Event> {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Event::Mouse {
                column: mouse_event.column,
                row: mouse_event.row,
            }),
            _ => None,
        }
    }

    pub(crate) fn convert_key_event(key_event: KeyEvent) -> Option<Event> {
        // Release/repeat events are reported on some platforms
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        match key_event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Quit),

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Ctrl(c)),

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => Some(Event::Char(c)),

            KeyEvent {
                code: KeyCode::Tab,
                ..
            } => Some(Event::Tab),
            KeyEvent {
                code: KeyCode::BackTab,
                ..
            } => Some(Event::BackTab),
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => Some(Event::Enter),
            KeyEvent {
                code: KeyCode::Esc, ..
            } => Some(Event::Escape),

            KeyEvent {
                code: KeyCode::Up, ..
            } => Some(Event::Up),
            KeyEvent {
                code: KeyCode::Down,
                ..
            } => Some(Event::Down),
            KeyEvent {
                code: KeyCode::Left,
                ..
            } => Some(Event::Left),
            KeyEvent {
                code: KeyCode::Right,
                ..
            } => Some(Event::Right),

            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => Some(Event::Backspace),
            KeyEvent {
                code: KeyCode::Delete,
                ..
            } => Some(Event::Delete),
            KeyEvent {
                code: KeyCode::Home,
                ..
            } => Some(Event::Home),
            KeyEvent {
                code: KeyCode::End, ..
            } => Some(Event::End),
            KeyEvent {
                code: KeyCode::PageUp,
                ..
            } => Some(Event::PageUp),
            KeyEvent {
                code: KeyCode::PageDown,
                ..
            } => Some(Event::PageDown),

            KeyEvent {
                code: KeyCode::F(1),
                ..
            } => Some(Event::Help),
            KeyEvent {
                code: KeyCode::F(5),
                ..
            } => Some(Event::Refresh),
            KeyEvent {
                code: KeyCode::F(n),
                ..
            } => Some(Event::F(n)),

            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown to the user for a failed API call
pub fn failure_message(error: &Error) -> String {
    match error {
        Error::Http(_) => format!("Serveur injoignable: {}", error),
        _ if error.is_network() => format!("Reponse du serveur: {}", error),
        _ => error.to_string(),
    }
}

/// Runs account API calls off the UI task and posts their results as events
#[derive(Debug, Clone)]
pub struct AccountOperations {
    client: BankClient,
    event_sender: mpsc::UnboundedSender<Event>,
}

impl AccountOperations {
    pub fn new(client: BankClient, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            client,
            event_sender,
        }
    }

    pub fn spawn_load(&self) {
        let ops = self.clone();
        tokio::spawn(async move { ops.load().await });
    }

    pub fn spawn_create(&self, draft: AccountDraft) {
        let ops = self.clone();
        tokio::spawn(async move { ops.create(draft).await });
    }

    pub fn spawn_update(&self, id: AccountId, draft: AccountDraft) {
        let ops = self.clone();
        tokio::spawn(async move { ops.update(id, draft).await });
    }

    pub fn spawn_delete(&self, id: AccountId) {
        let ops = self.clone();
        tokio::spawn(async move { ops.delete(id).await });
    }

    pub async fn load(&self) {
        let result = self.client.list_accounts().await.map_err(|e| {
            tracing::error!(error = %e, "failed to load accounts");
            failure_message(&e)
        });
        self.post(Event::AccountsLoaded(result));
    }

    pub async fn create(&self, draft: AccountDraft) {
        let result = self.client.create_account(&draft).await.map_err(|e| {
            tracing::error!(error = %e, "failed to create account");
            failure_message(&e)
        });
        self.post(Event::AccountCreated(result));
    }

    pub async fn update(&self, id: AccountId, draft: AccountDraft) {
        let result = self.client.update_account(id, &draft).await.map_err(|e| {
            tracing::error!(id, error = %e, "failed to update account");
            failure_message(&e)
        });
        self.post(Event::AccountUpdated { id, result });
    }

    pub async fn delete(&self, id: AccountId) {
        let result = self.client.delete_account(id).await.map_err(|e| {
            tracing::error!(id, error = %e, "failed to delete account");
            failure_message(&e)
        });
        self.post(Event::AccountDeleted { id, result });
    }

    fn post(&self, event: Event) {
        if self.event_sender.send(event).is_err() {
            tracing::debug!("event loop gone, dropping API result");
        }
    }
}
