use super::{Converter, StatusEvent};
use crate::cancel::CancelFlag;
use crate::excel::DocumentExport;
use crate::types::ConversionResult;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

/// Handle to a conversion running on a blocking worker.
///
/// The owner reads status events with [`next_event`](Self::next_event) and
/// collects the result with [`finish`](Self::finish). The event stream ends
/// once the worker has closed its export session.
pub struct ConversionTask<D> {
    events: UnboundedReceiver<StatusEvent>,
    cancel: CancelFlag,
    handle: JoinHandle<(ConversionResult, D)>,
}

impl<D> ConversionTask<D> {
    pub async fn next_event(&mut self) -> Option<StatusEvent> {
        self.events.recv().await
    }

    /// Ask the worker to stop at the next row. Its session is still closed.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the worker and hand back the result and the document
    pub async fn finish(self) -> Result<(ConversionResult, D), JoinError> {
        self.handle.await
    }
}

/// Re-enables the trigger and stops the busy indicator when the worker ends,
/// including when it unwinds.
struct ReleaseControls(UnboundedSender<StatusEvent>);

impl Drop for ReleaseControls {
    fn drop(&mut self) {
        let _ = self.0.send(StatusEvent::Busy { busy: false });
        let _ = self.0.send(StatusEvent::TriggerEnabled { enabled: true });
    }
}

/// Start converting `image_path` off the calling task.
///
/// `TriggerEnabled(false)` and `Busy(true)` are queued before this returns.
/// Must be called from inside a Tokio runtime.
pub fn spawn_conversion<D>(converter: Converter, image_path: PathBuf, document: D) -> ConversionTask<D>
where
    D: DocumentExport + Send + 'static,
{
    let (tx, events) = unbounded_channel();
    let cancel = CancelFlag::new();

    let _ = tx.send(StatusEvent::TriggerEnabled { enabled: false });
    let _ = tx.send(StatusEvent::Busy { busy: true });

    let worker_cancel = cancel.clone();
    let handle = tokio::task::spawn_blocking(move || {
        let release = ReleaseControls(tx.clone());
        let mut document = document;

        let result = converter.convert(&image_path, &mut document, &worker_cancel, |event| {
            // The receiver may be gone if the UI shut down first
            let _ = tx.send(event);
        });
        debug!(status = ?result.status, "conversion worker done");

        drop(release);
        (result, document)
    });

    ConversionTask {
        events,
        cancel,
        handle,
    }
}
