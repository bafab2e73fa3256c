//! Reusable UI Components
//!
//! Widgets shared by the screens and the modal layers of the TUI.

// Layout components
pub mod header;
pub mod modals;
pub mod status_bar;
pub mod toast_layer;

pub use header::*;
pub use modals::*;
pub use status_bar::*;
pub use toast_layer::*;

// Data display components
pub mod tables;

// Input components
pub mod account_form;
pub mod date_picker;
pub mod forms;

pub use account_form::*;
pub use forms::*;
pub use tables::*;
