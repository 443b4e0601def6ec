//! Debounced persistence of the application aggregate.
//!
//! A writer task watches the store revision. After a change it waits until no
//! further change arrives for the quiet period, then writes one snapshot.
//! Bursts of mutations (user message, N persona replies, concept merge)
//! therefore cost a single write. A steady stream of changes is still written
//! at least every `MAX_WAIT_FACTOR` quiet periods.

use crate::store::SophiStore;
use sophi_core::error::Result;
use sophi_core::repository::DataRepository;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Longest a pending change waits, in multiples of the quiet period.
pub const MAX_WAIT_FACTOR: u32 = 10;

pub struct DebouncedPersister {
    inner: Arc<PersisterInner>,
    handle: JoinHandle<()>,
}

struct PersisterInner {
    store: Arc<SophiStore>,
    repository: Arc<dyn DataRepository>,
    /// Revision of the last snapshot written successfully
    written: AtomicU64,
    /// Serializes writes so an older snapshot never lands after a newer one
    write_lock: Mutex<()>,
}

impl PersisterInner {
    /// Writes the current snapshot unless it is already on disk.
    async fn write_if_dirty(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let (snapshot, revision) = self.store.snapshot_with_revision().await;
        if revision <= self.written.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.repository.save(&snapshot).await?;
        self.written.store(revision, Ordering::SeqCst);
        tracing::debug!(target: "persistence", "[DebouncedPersister] wrote revision {}", revision);
        Ok(true)
    }
}

impl DebouncedPersister {
    /// Starts the writer task on the current runtime.
    pub fn spawn(
        store: Arc<SophiStore>,
        repository: Arc<dyn DataRepository>,
        quiet_period: Duration,
    ) -> Self {
        let inner = Arc::new(PersisterInner {
            written: AtomicU64::new(store.revision()),
            store,
            repository,
            write_lock: Mutex::new(()),
        });

        let mut revisions = inner.store.subscribe();
        let task_inner = Arc::clone(&inner);
        let handle = tokio::spawn(async move {
            while revisions.changed().await.is_ok() {
                // Keep extending the wait while changes keep arriving, up to the cap.
                let deadline = Instant::now() + quiet_period * MAX_WAIT_FACTOR;
                loop {
                    let wake = (Instant::now() + quiet_period).min(deadline);
                    match tokio::time::timeout_at(wake, revisions.changed()).await {
                        Ok(Ok(())) if Instant::now() < deadline => continue,
                        Ok(Ok(())) | Ok(Err(_)) | Err(_) => break,
                    }
                }
                if let Err(e) = task_inner.write_if_dirty().await {
                    tracing::error!(target: "persistence", "[DebouncedPersister] save failed: {}", e);
                }
            }
            tracing::debug!(target: "persistence", "[DebouncedPersister] revision channel closed, writer exiting");
        });

        Self { inner, handle }
    }

    /// Writes the latest snapshot immediately if it has not been written yet.
    ///
    /// Returns whether a write happened.
    pub async fn flush(&self) -> Result<bool> {
        self.inner.write_if_dirty().await
    }

    /// Revision of the last snapshot written.
    pub fn written_revision(&self) -> u64 {
        self.inner.written.load(Ordering::SeqCst)
    }

    /// Flushes pending changes and stops the writer task.
    pub async fn shutdown(self) -> Result<()> {
        self.inner.write_if_dirty().await.map(|_| ())
    }
}

impl Drop for DebouncedPersister {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
