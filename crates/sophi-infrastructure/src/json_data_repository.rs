//! JSON-file DataRepository implementation.

use crate::storage::{AtomicJsonError, AtomicJsonFile};
use async_trait::async_trait;
use sophi_core::error::{Result, SophiError};
use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stores the whole aggregate as one pretty-printed JSON document.
///
/// File I/O runs on the blocking pool so callers on the async runtime are
/// never stalled by fsync.
#[derive(Clone)]
pub struct JsonDataRepository {
    file: Arc<AtomicJsonFile<SophiData>>,
}

impl JsonDataRepository {
    /// Creates a repository backed by `path` (tests, custom locations).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl DataRepository for JsonDataRepository {
    async fn load(&self) -> Result<Option<SophiData>> {
        let file = Arc::clone(&self.file);
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| SophiError::internal(format!("load task panicked: {e}")))?
            .map_err(into_sophi_error)?;

        match &loaded {
            Some(data) => tracing::debug!(
                "[JsonDataRepository] Loaded {} conversations from {:?}",
                data.conversations.len(),
                self.path()
            ),
            None => tracing::debug!("[JsonDataRepository] No data file at {:?}", self.path()),
        }
        Ok(loaded)
    }

    async fn save(&self, data: &SophiData) -> Result<()> {
        let file = Arc::clone(&self.file);
        let snapshot = data.clone();
        tokio::task::spawn_blocking(move || file.save(&snapshot))
            .await
            .map_err(|e| SophiError::internal(format!("save task panicked: {e}")))?
            .map_err(into_sophi_error)
    }
}

fn into_sophi_error(err: AtomicJsonError) -> SophiError {
    match err {
        AtomicJsonError::Io(e) => e.into(),
        AtomicJsonError::Json(e) => e.into(),
        AtomicJsonError::Lock(message) => SophiError::data_access(message),
    }
}
