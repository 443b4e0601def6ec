//! In-memory DataRepository for tests and ephemeral sessions.

use async_trait::async_trait;
use sophi_core::error::{Result, SophiError};
use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Keeps the last saved snapshot in memory and counts writes.
#[derive(Default)]
pub struct InMemoryDataRepository {
    data: RwLock<Option<SophiData>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `data`.
    pub fn with_data(data: SophiData) -> Self {
        Self {
            data: RwLock::new(Some(data)),
            ..Self::default()
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Makes subsequent saves fail (error-path tests).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> Option<SophiData> {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl DataRepository for InMemoryDataRepository {
    async fn load(&self) -> Result<Option<SophiData>> {
        Ok(self.data.read().await.clone())
    }

    async fn save(&self, data: &SophiData) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SophiError::data_access("simulated save failure"));
        }
        *self.data.write().await = Some(data.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
