//! BankHub TUI Module
//!
//! Terminal interface for browsing, searching, creating, editing and
//! deleting bank accounts against the REST backend.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod tests;

pub use app::{App, AppState, Screen};
pub use events::{AccountOperations, Event, EventHandler};
pub use ui::render_ui;

use crate::client::BankClient;
use crate::config::AppConfig;
use crate::error::Error;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Set while the terminal is in raw/alternate mode
static TERMINAL_NEEDS_CLEANUP: AtomicBool = AtomicBool::new(false);

/// How long the loop waits for an event before redrawing anyway
const TICK: Duration = Duration::from_millis(100);

/// Initialize the terminal for TUI mode
///
/// Enables raw mode, the alternate screen and mouse capture (the date picker
/// popup and the account table react to clicks).
pub fn init_terminal() -> Result<TuiTerminal, Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);

    Ok(terminal)
}

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal(terminal: &mut TuiTerminal) -> Result<(), Error> {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
    Ok(())
}

/// Best-effort restoration used from the panic hook
fn emergency_terminal_cleanup() {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = execute!(io::stdout(), cursor::Show);
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
}

/// Install a panic hook that restores the terminal before reporting
pub fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        emergency_terminal_cleanup();
        original_hook(panic_info);
    }));
}

/// Run the TUI until the user quits or a fatal error occurs
pub async fn run_tui(client: BankClient, config: AppConfig) -> Result<(), Error> {
    setup_panic_handler();

    let mut terminal = init_terminal().inspect_err(|_| emergency_terminal_cleanup())?;

    let mut event_handler = EventHandler::new();
    let mut app = App::new(client, &config, event_handler.sender());
    app.start();

    tracing::info!(api = %config.api_base_url, "TUI started");
    let app_result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    if let Err(restore_error) = restore_terminal(&mut terminal) {
        if app_result.is_ok() {
            return Err(restore_error);
        }
        tracing::error!(error = %restore_error, "failed to restore terminal");
    }

    tracing::info!("TUI stopped");
    app_result
}

async fn run_app_loop(
    terminal: &mut TuiTerminal,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<(), Error> {
    loop {
        app.toasts.process_pending();

        terminal.draw(|frame| render_ui(frame, app))?;

        match tokio::time::timeout(TICK, event_handler.next()).await {
            Ok(Some(event)) => match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => app.set_error(e.to_string()),
            },
            Ok(None) => break,
            // Timeout: redraw so expired toasts disappear
            Err(_) => {}
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod terminal_tests {
    use super::*;

    #[test]
    fn test_emergency_terminal_cleanup_resets_flag() {
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
        emergency_terminal_cleanup();
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));
    }

    #[test]
    fn test_panic_handler_setup() {
        setup_panic_handler();
    }
}
