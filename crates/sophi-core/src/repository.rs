//! Persistence interface for the application aggregate.

use crate::error::Result;
use crate::state::SophiData;
use async_trait::async_trait;

/// An abstract store for the single persisted `SophiData` document.
///
/// Implementations must replace the stored document atomically: a reader
/// never observes a half-written snapshot.
#[async_trait]
pub trait DataRepository: Send + Sync {
    /// Loads the stored aggregate.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))`: a document was found and decoded
    /// - `Ok(None)`: nothing has been saved yet
    /// - `Err(_)`: the document exists but could not be read or decoded
    async fn load(&self) -> Result<Option<SophiData>>;

    /// Replaces the stored aggregate with `data`.
    async fn save(&self, data: &SophiData) -> Result<()>;
}
