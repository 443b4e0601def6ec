//! Session context notes.
//!
//! At most one note is active at a time; its content is injected into the
//! system instruction as session context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            timestamp,
        }
    }
}
