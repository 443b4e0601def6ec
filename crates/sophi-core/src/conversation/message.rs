//! Conversation message types.
//!
//! Messages are immutable once appended. Assistant messages optionally carry
//! the id of the persona that produced them and the structured tags parsed out
//! of the raw model output.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from a persona (or a synthetic failure notice).
    Assistant,
}

/// A named logical fallacy flagged by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallacy {
    pub name: String,
    pub definition: String,
    pub example: String,
}

/// Structured data attached to assistant messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    /// Whether the raw output contained the contradiction sentinel
    #[serde(default)]
    pub contradiction_detected: bool,
    /// Fallacy tags in source order
    #[serde(default)]
    pub fallacies: Vec<Fallacy>,
    /// Set only on synthetic messages standing in for a failed model call
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID format)
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Persona that produced this message (multi-persona turns only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    /// Creates a user message stamped with `timestamp`.
    pub fn user(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            timestamp,
            persona: None,
            metadata: None,
        }
    }

    /// Creates an assistant message with parsed metadata.
    pub fn assistant(
        content: impl Into<String>,
        timestamp: i64,
        persona: Option<String>,
        metadata: MessageMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp,
            persona,
            metadata: Some(metadata),
        }
    }

    /// Creates a synthetic assistant message describing a failed model call.
    pub fn failure(content: impl Into<String>, timestamp: i64, persona: Option<String>) -> Self {
        Self::assistant(
            content,
            timestamp,
            persona,
            MessageMetadata {
                error: true,
                ..Default::default()
            },
        )
    }

    pub fn is_error(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.error)
    }
}
