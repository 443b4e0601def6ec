//! Shared, revisioned access to the application aggregate.
//!
//! `SophiStore` wraps `SophiData` the way `SessionUpdater` wraps a session:
//! callers hand in a closure that applies one named mutation. Every
//! successful mutation bumps a revision on a `watch` channel, which is what
//! the debounced persister listens to.

use sophi_core::error::Result;
use sophi_core::state::SophiData;
use tokio::sync::{RwLock, watch};

pub struct SophiStore {
    data: RwLock<SophiData>,
    revision: watch::Sender<u64>,
}

impl SophiStore {
    pub fn new(data: SophiData) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            data: RwLock::new(data),
            revision,
        }
    }

    /// Applies `updater` under the write lock.
    ///
    /// The revision is bumped only when `updater` returns `Ok`; an `Err` must
    /// leave the aggregate untouched, which every `SophiData` operation does.
    pub async fn update<F, R>(&self, updater: F) -> Result<R>
    where
        F: FnOnce(&mut SophiData) -> Result<R>,
    {
        let mut data = self.data.write().await;
        let result = updater(&mut data)?;
        self.revision.send_modify(|rev| *rev += 1);
        tracing::trace!("[SophiStore] revision -> {}", *self.revision.borrow());
        Ok(result)
    }

    /// Runs `reader` against the current aggregate without cloning it.
    pub async fn read<F, R>(&self, reader: F) -> R
    where
        F: FnOnce(&SophiData) -> R,
    {
        let data = self.data.read().await;
        reader(&data)
    }

    pub async fn snapshot(&self) -> SophiData {
        self.data.read().await.clone()
    }

    /// Returns a snapshot together with the revision it reflects.
    pub async fn snapshot_with_revision(&self) -> (SophiData, u64) {
        let data = self.data.read().await;
        let revision = *self.revision.borrow();
        (data.clone(), revision)
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Subscribes to revision changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophi_core::SophiError;

    #[tokio::test]
    async fn test_successful_update_bumps_revision() {
        let store = SophiStore::new(SophiData::new());
        let mut rx = store.subscribe();

        store
            .update(|data| {
                data.set_user_prompt("be brief");
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(store.revision(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
        assert_eq!(store.read(|d| d.user_prompt.clone()).await, "be brief");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_revision() {
        let store = SophiStore::new(SophiData::new());
        let result: Result<()> = store
            .update(|_| Err(SophiError::invalid_input("nope")))
            .await;

        assert!(result.is_err());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_with_revision_is_consistent() {
        let store = SophiStore::new(SophiData::new());
        store
            .update(|data| {
                data.set_emoji_mode(true);
                Ok(())
            })
            .await
            .unwrap();

        let (snapshot, revision) = store.snapshot_with_revision().await;
        assert!(snapshot.emoji_mode);
        assert_eq!(revision, 1);
    }
}
