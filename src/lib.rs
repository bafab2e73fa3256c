pub mod account;
pub mod client;
pub mod config;
pub mod date_picker;
pub mod error;
pub mod logging;
pub mod toast;

// TUI module - optional via "tui" feature
#[cfg(feature = "tui")]
pub mod tui;

pub use account::{Account, AccountDraft, AccountId, AccountSummary, AccountType};
pub use client::BankClient;
pub use config::AppConfig;
pub use date_picker::{ChangeEvent, DatePicker};
pub use error::Error;
pub use toast::{Toast, ToastId, ToastKind, ToastQueue, Toaster};

// Re-export TUI entry point when feature is enabled
#[cfg(feature = "tui")]
pub use tui::run_tui;
