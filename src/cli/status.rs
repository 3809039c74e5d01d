//! UI-side view of a running conversion

use crate::convert::StatusEvent;
use crate::types::format_elapsed;

/// Braille spinner shown while a conversion is busy
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Status text and control state, updated only from received events
#[derive(Debug, Clone)]
pub struct StatusBoard {
    text: String,
    busy: bool,
    trigger_enabled: bool,
    progress: Option<(u32, u32)>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            text: String::new(),
            busy: false,
            trigger_enabled: true,
            progress: None,
        }
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::TriggerEnabled { enabled } => self.trigger_enabled = *enabled,
            StatusEvent::Busy { busy } => self.busy = *busy,
            StatusEvent::Started { .. } => {
                self.text = "Conversion started".to_string();
                self.progress = None;
            }
            StatusEvent::Progress {
                rows_done,
                rows_total,
            } => self.progress = Some((*rows_done, *rows_total)),
            StatusEvent::Succeeded { elapsed, .. } => {
                self.text = format!("Conversion finished in {}", format_elapsed(*elapsed));
            }
            StatusEvent::Failed { message } => self.text = message.clone(),
            StatusEvent::Cancelled => self.text = "Conversion cancelled".to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn progress(&self) -> Option<(u32, u32)> {
        self.progress
    }

    /// One spinner line, e.g. `⠙ Conversion started - row 12/480 (2%)`
    pub fn spinner_line(&self, frame: usize) -> String {
        let spinner = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
        match self.progress {
            Some((done, total)) if total > 0 => format!(
                "{} {} - row {}/{} ({}%)",
                spinner,
                self.text,
                done,
                total,
                u64::from(done) * 100 / u64::from(total)
            ),
            _ => format!("{} {}", spinner, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_initial_state() {
        let board = StatusBoard::new();
        assert!(board.trigger_enabled());
        assert!(!board.busy());
        assert_eq!(board.text(), "");
    }

    #[test]
    fn test_full_run_sequence() {
        let mut board = StatusBoard::new();
        board.apply(&StatusEvent::TriggerEnabled { enabled: false });
        board.apply(&StatusEvent::Busy { busy: true });
        board.apply(&StatusEvent::Started {
            image: PathBuf::from("cat.jpg"),
        });
        assert_eq!(board.text(), "Conversion started");
        assert!(!board.trigger_enabled());
        assert!(board.busy());

        board.apply(&StatusEvent::Progress {
            rows_done: 5,
            rows_total: 10,
        });
        assert_eq!(board.progress(), Some((5, 10)));
        assert!(board.spinner_line(0).ends_with("row 5/10 (50%)"));

        board.apply(&StatusEvent::Succeeded {
            elapsed: Duration::from_secs(3725),
            output: PathBuf::from("cat.xlsx"),
        });
        board.apply(&StatusEvent::Busy { busy: false });
        board.apply(&StatusEvent::TriggerEnabled { enabled: true });

        assert_eq!(board.text(), "Conversion finished in 1h 2m 5s");
        assert!(board.trigger_enabled());
        assert!(!board.busy());
    }

    #[test]
    fn test_failure_and_cancel_text() {
        let mut board = StatusBoard::new();
        board.apply(&StatusEvent::Failed {
            message: "Conversion failed: Could not read the image".to_string(),
        });
        assert_eq!(board.text(), "Conversion failed: Could not read the image");

        board.apply(&StatusEvent::Cancelled);
        assert_eq!(board.text(), "Conversion cancelled");
    }

    #[test]
    fn test_spinner_cycles() {
        let board = StatusBoard::new();
        assert_eq!(
            board.spinner_line(0).chars().next(),
            board.spinner_line(SPINNER_FRAMES.len()).chars().next()
        );
    }
}
