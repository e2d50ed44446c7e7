//! Shared holder for the currently loaded detection corpus.
//!
//! Readers take an `Arc<Session>` snapshot and work on it without holding
//! the lock. A new upload builds and validates the next [`Session`] first,
//! then swaps it in, so readers see either the old corpus or the new one in
//! full. In-flight queries are not synchronized against the swap.

use std::sync::Arc;

use sherlock_core::detection::FrameRecord;
use sherlock_core::error::CoreError;
use sherlock_core::session::Session;
use tokio::sync::RwLock;

pub struct CorpusStore {
    current: RwLock<Arc<Session>>,
    confidence_threshold: f64,
}

impl CorpusStore {
    /// Create an empty store using `confidence_threshold` for every corpus.
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            current: RwLock::new(Arc::new(Session::empty(confidence_threshold))),
            confidence_threshold,
        }
    }

    /// The session current at the moment of the call.
    pub async fn snapshot(&self) -> Arc<Session> {
        Arc::clone(&*self.current.read().await)
    }

    /// Replace the whole corpus. Invalid frames leave the current one intact.
    pub async fn replace(&self, frames: Vec<FrameRecord>) -> Result<Arc<Session>, CoreError> {
        let next = Arc::new(Session::load(frames, self.confidence_threshold)?);
        *self.current.write().await = Arc::clone(&next);
        tracing::info!(
            frames = next.frame_count(),
            detections = next.detection_count(),
            "Detection corpus replaced",
        );
        Ok(next)
    }

    /// Drop the current corpus.
    pub async fn clear(&self) {
        *self.current.write().await = Arc::new(Session::empty(self.confidence_threshold));
        tracing::info!("Detection corpus cleared");
    }
}
