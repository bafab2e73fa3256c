//! Screen Implementations
//!
//! Full-screen views of the TUI: the account list and the creation form.

pub mod accounts;
pub mod new_account;

pub use accounts::*;
pub use new_account::*;
