use super::DocumentExport;
use crate::error::{MosaicError, MosaicResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of the saved workbook
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Workbook path for an image: same directory and stem, `.xlsx` extension
pub fn output_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension(OUTPUT_EXTENSION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    SessionOpen,
    Saving,
    Closed,
}

/// Lifecycle guard around one document backend for one conversion.
///
/// Dropping the session closes it, so every exit path (errors, `?`,
/// cancellation, panics unwinding through the task) releases the document.
pub struct ExportSession<'d, D: DocumentExport + ?Sized> {
    document: &'d mut D,
    state: SessionState,
}

impl<'d, D: DocumentExport + ?Sized> ExportSession<'d, D> {
    /// Open a new workbook on `document`.
    ///
    /// A backend that fails half way through opening is closed again before
    /// the error is returned.
    pub fn open(document: &'d mut D) -> MosaicResult<Self> {
        let mut session = Self {
            document,
            state: SessionState::Idle,
        };

        match session.document.open_session() {
            Ok(()) => {
                session.state = SessionState::SessionOpen;
                debug!("export session open");
                Ok(session)
            }
            Err(e) => {
                session.close();
                Err(match e {
                    MosaicError::SessionStart(_) => e,
                    other => MosaicError::SessionStart(other.to_string()),
                })
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The backend, available for writes only while the session is open
    pub fn document_mut(&mut self) -> MosaicResult<&mut D> {
        if self.state != SessionState::SessionOpen {
            return Err(MosaicError::Export(format!(
                "export session is {:?}, not open",
                self.state
            )));
        }
        Ok(&mut *self.document)
    }

    /// Persist the workbook to `path`
    pub fn save(&mut self, path: &Path) -> MosaicResult<()> {
        if self.state != SessionState::SessionOpen {
            return Err(MosaicError::Save {
                path: path.to_path_buf(),
                reason: format!("export session is {:?}", self.state),
            });
        }
        self.state = SessionState::Saving;

        self.document.save(path).map_err(|e| match e {
            MosaicError::Save { .. } => e,
            other => MosaicError::Save {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
    }

    /// Force the document closed. Safe to call more than once.
    ///
    /// Close failures are logged and dropped so they never replace the
    /// outcome of the conversion itself.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        if let Err(e) = self.document.close_forcefully() {
            let e = match e {
                MosaicError::Termination(_) => e,
                other => MosaicError::Termination(other.to_string()),
            };
            warn!("{}", e);
        }
        self.state = SessionState::Closed;
        debug!("export session closed");
    }
}

impl<D: DocumentExport + ?Sized> Drop for ExportSession<'_, D> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{CellColor, ChannelOrder};
    use crate::config::CellGeometry;
    use crate::excel::MemoryDocument;
    use crate::types::CellCoordinate;

    /// Backend whose steps fail on demand
    #[derive(Default)]
    struct Flaky {
        fail_open: bool,
        fail_save: bool,
        fail_close: bool,
        close_calls: usize,
    }

    impl DocumentExport for Flaky {
        fn channel_order(&self) -> ChannelOrder {
            ChannelOrder::Rgb
        }
        fn open_session(&mut self) -> MosaicResult<()> {
            if self.fail_open {
                return Err(MosaicError::Export("no workbook".into()));
            }
            Ok(())
        }
        fn size_cells(&mut self, _: u32, _: u32, _: &CellGeometry) -> MosaicResult<()> {
            Ok(())
        }
        fn set_cell_color(&mut self, _: CellCoordinate, _: CellColor) -> MosaicResult<()> {
            Ok(())
        }
        fn save(&mut self, _: &Path) -> MosaicResult<()> {
            if self.fail_save {
                return Err(MosaicError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok(())
        }
        fn close_forcefully(&mut self) -> MosaicResult<()> {
            self.close_calls += 1;
            if self.fail_close {
                return Err(MosaicError::Io(std::io::Error::other("already gone")));
            }
            Ok(())
        }
    }

    // ==================== Output Path Tests ====================

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            output_path_for(Path::new("/photos/cat.jpg")),
            PathBuf::from("/photos/cat.xlsx")
        );
        assert_eq!(
            output_path_for(Path::new("relative/dog.final.png")),
            PathBuf::from("relative/dog.final.xlsx")
        );
        assert_eq!(output_path_for(Path::new("noext")), PathBuf::from("noext.xlsx"));
    }

    // ==================== Lifecycle Tests ====================

    #[test]
    fn test_open_save_close_sequence() {
        let mut doc = MemoryDocument::new(ChannelOrder::Rgb);
        {
            let mut session = ExportSession::open(&mut doc).unwrap();
            assert_eq!(session.state(), SessionState::SessionOpen);
            session.save(Path::new("out.xlsx")).unwrap();
            assert_eq!(session.state(), SessionState::Saving);
            session.close();
            assert_eq!(session.state(), SessionState::Closed);
        }
        assert!(!doc.is_open());
        assert_eq!(doc.sessions_closed(), 1);
    }

    #[test]
    fn test_drop_closes_session() {
        let mut doc = MemoryDocument::new(ChannelOrder::Rgb);
        {
            let _session = ExportSession::open(&mut doc).unwrap();
        }
        assert!(!doc.is_open());
        assert_eq!(doc.sessions_closed(), 1);
    }

    #[test]
    fn test_writes_rejected_after_close() {
        let mut doc = MemoryDocument::new(ChannelOrder::Rgb);
        let mut session = ExportSession::open(&mut doc).unwrap();
        session.close();
        assert!(session.document_mut().is_err());
        assert!(session.save(Path::new("x.xlsx")).is_err());
    }

    #[test]
    fn test_open_failure_is_session_start_and_closes() {
        let mut doc = Flaky {
            fail_open: true,
            ..Flaky::default()
        };
        let result = ExportSession::open(&mut doc);
        assert!(matches!(result, Err(MosaicError::SessionStart(_))));
        drop(result);
        assert_eq!(doc.close_calls, 1);
    }

    #[test]
    fn test_save_failure_is_save_error() {
        let mut doc = Flaky {
            fail_save: true,
            ..Flaky::default()
        };
        let mut session = ExportSession::open(&mut doc).unwrap();
        let result = session.save(Path::new("/readonly/out.xlsx"));
        assert!(matches!(result, Err(MosaicError::Save { .. })));
    }

    #[test]
    fn test_close_failure_is_swallowed() {
        let mut doc = Flaky {
            fail_close: true,
            ..Flaky::default()
        };
        {
            let mut session = ExportSession::open(&mut doc).unwrap();
            session.close();
            assert_eq!(session.state(), SessionState::Closed);
            session.close();
        }
        assert_eq!(doc.close_calls, 1);
    }
}
