//! Last-error slot for background render jobs

use crate::render::RenderError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Holds the most recent worker error until the UI picks it up.
///
/// Jobs have no caller to return to, so they record here instead. Newer
/// errors overwrite older ones.
#[derive(Debug, Clone, Default)]
pub struct WorkerErrorSink {
    slot: Arc<Mutex<Option<RenderError>>>,
}

impl WorkerErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, error: RenderError) {
        log::warn!("render worker error: {error}");
        *self.slot.lock() = Some(error);
    }

    /// Take the pending error, leaving the slot empty
    pub fn take(&self) -> Option<RenderError> {
        self.slot.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}
