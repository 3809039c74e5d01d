use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Status update sent from a running conversion to the UI owner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    /// The control that starts conversions should be enabled or disabled
    TriggerEnabled { enabled: bool },
    /// Busy indicator on or off
    Busy { busy: bool },
    Started { image: PathBuf },
    Progress { rows_done: u32, rows_total: u32 },
    Succeeded { elapsed: Duration, output: PathBuf },
    Failed { message: String },
    Cancelled,
}
