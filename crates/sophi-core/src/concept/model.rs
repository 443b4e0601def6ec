//! Concept graph entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest importance a concept can carry.
pub const MIN_IMPORTANCE: u8 = 1;
/// Highest importance a concept can carry.
pub const MAX_IMPORTANCE: u8 = 5;

/// A philosophical concept surfaced from dialogue.
///
/// Concepts are keyed case-insensitively by `label`. `connections` lists the
/// ids of conversations in which the concept appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Weight in the range 1..=5
    pub importance: u8,
    #[serde(default)]
    pub connections: Vec<String>,
}

impl Concept {
    /// Creates a concept from an extraction result, linked to `conversation_id`.
    pub fn from_extracted(extracted: &ExtractedConcept, conversation_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: extracted.label.trim().to_string(),
            description: extracted.description.clone(),
            category: extracted.category.clone(),
            importance: clamp_importance(extracted.importance),
            connections: vec![conversation_id.to_string()],
        }
    }

    /// Returns true when `label` names this concept, ignoring case.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.trim().to_lowercase() == label.trim().to_lowercase()
    }

    /// Records `conversation_id` as a connection; returns false if already present.
    pub fn connect(&mut self, conversation_id: &str) -> bool {
        if self.connections.iter().any(|c| c == conversation_id) {
            return false;
        }
        self.connections.push(conversation_id.to_string());
        true
    }
}

/// A concept as returned by the extraction collaborator, before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedConcept {
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub importance: Option<i64>,
}

fn clamp_importance(raw: Option<i64>) -> u8 {
    raw.unwrap_or(MIN_IMPORTANCE as i64)
        .clamp(MIN_IMPORTANCE as i64, MAX_IMPORTANCE as i64) as u8
}
