//! Conversion orchestration
//!
//! [`Converter`] runs one image through decode → session → build → save and
//! always closes the session. [`spawn_conversion`] runs it on a blocking
//! worker and streams [`StatusEvent`]s back to whoever owns the UI.

mod events;
mod orchestrator;
mod task;

pub use events::StatusEvent;
pub use orchestrator::Converter;
pub use task::{spawn_conversion, ConversionTask};
