//! TUI Utility Modules

pub mod formatting;
pub mod validation;

pub use formatting::*;
pub use validation::*;
