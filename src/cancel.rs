use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag telling a running conversion to stop at the next row.
///
/// Clones observe the same flag. Each conversion gets its own.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
