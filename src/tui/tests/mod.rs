mod ui_tests;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::account::{Account, AccountId, AccountType};
use crate::client::BankClient;
use crate::config::AppConfig;
use crate::tui::app::App;
use crate::tui::events::Event;

/// App wired to an unreachable backend; API results are injected by hand
pub(crate) fn test_app() -> (App, mpsc::UnboundedReceiver<Event>) {
    let config = AppConfig::default();
    let client = BankClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let (sender, receiver) = mpsc::unbounded_channel();
    (App::new(client, &config, sender), receiver)
}

pub(crate) fn account(id: AccountId, solde: f64, kind: Option<AccountType>) -> Account {
    Account {
        id,
        solde,
        date_creation: chrono::NaiveDate::from_ymd_opt(2024, 1, 5),
        account_type: kind,
    }
}

pub(crate) fn toast_messages(app: &mut App) -> Vec<String> {
    app.toasts.process_pending();
    app.toasts
        .toasts()
        .iter()
        .map(|t| t.message.clone())
        .collect()
}
