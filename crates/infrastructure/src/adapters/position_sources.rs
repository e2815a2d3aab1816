//! Position sources - PositionStreamPort implementations
//!
//! `FixedPositionSource` replays one configured position (a headless
//! stand-in for the platform location service); `ChannelPositionSource`
//! bridges an embedder's own position feed into the port.

use application::ports::{PositionFix, PositionStreamPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Emits a single configured fix, then ends the stream
#[derive(Debug)]
pub struct FixedPositionSource {
    fix: Mutex<Option<PositionFix>>,
}

impl FixedPositionSource {
    /// Create a source that reports `location` once
    #[must_use]
    pub fn new(location: GeoLocation) -> Self {
        Self {
            fix: Mutex::new(Some(PositionFix::now(location))),
        }
    }
}

#[async_trait]
impl PositionStreamPort for FixedPositionSource {
    async fn next_fix(&self) -> Option<PositionFix> {
        let fix = self.fix.lock().await.take();
        if fix.is_some() {
            debug!("Emitting fixed position");
        }
        fix
    }
}

/// Forwards fixes from a channel owned by the embedder
#[derive(Debug)]
pub struct ChannelPositionSource {
    receiver: Mutex<mpsc::Receiver<PositionFix>>,
}

impl ChannelPositionSource {
    /// Create a source and the sender half feeding it
    #[must_use]
    pub fn channel(buffer: usize) -> (mpsc::Sender<PositionFix>, Self) {
        let (sender, receiver) = mpsc::channel(buffer);
        (
            sender,
            Self {
                receiver: Mutex::new(receiver),
            },
        )
    }
}

#[async_trait]
impl PositionStreamPort for ChannelPositionSource {
    async fn next_fix(&self) -> Option<PositionFix> {
        self.receiver.lock().await.recv().await
    }
}
