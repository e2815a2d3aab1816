//! Device location tracking service
//!
//! Owns the single position subscription for the whole application:
//! consumes a push-only position stream and retains only the most recent
//! fix (no filtering, no accuracy gating - last update wins). Constructed
//! once at startup and injected wherever the current position is needed;
//! `start` and `stop` bound its lifecycle explicitly.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApplicationError;
use crate::ports::{PositionFix, PositionStreamPort};

/// Retains the most recent device position fix
pub struct LocationTracker {
    latest: Arc<watch::Sender<Option<PositionFix>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for LocationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationTracker")
            .field("running", &self.worker.lock().is_some())
            .field("last_known", &*self.latest.borrow())
            .finish()
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationTracker {
    /// Create a tracker with no position yet
    #[must_use]
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            latest: Arc::new(latest),
            worker: Mutex::new(None),
        }
    }

    /// Start consuming the position stream
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when the tracker is already started.
    pub fn start(&self, source: Arc<dyn PositionStreamPort>) -> Result<(), ApplicationError> {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Err(ApplicationError::InvalidOperation(
                "location tracker is already started".to_string(),
            ));
        }

        info!("Starting location tracking");
        let latest = Arc::clone(&self.latest);
        *worker = Some(tokio::spawn(async move {
            while let Some(fix) = source.next_fix().await {
                debug!(location = %fix.location, "Position update");
                latest.send_replace(Some(fix));
            }
            debug!("Position stream ended");
        }));
        Ok(())
    }

    /// Stop consuming the stream and drop the subscription
    ///
    /// The last known fix stays available. Safe to call when not started.
    pub fn stop(&self) {
        if let Some(handle) = self.worker.lock().take() {
            info!("Stopping location tracking");
            handle.abort();
        }
    }

    /// The most recent fix, if any update arrived yet
    #[must_use]
    pub fn last_known(&self) -> Option<PositionFix> {
        *self.latest.borrow()
    }

    /// Observe position updates
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<PositionFix>> {
        self.latest.subscribe()
    }
}

impl Drop for LocationTracker {
    fn drop(&mut self) {
        self.stop();
    }
}
