//! CLI command handlers

pub mod commands;
pub mod status;

pub use commands::{convert, inspect};
pub use status::StatusBoard;
