//! Conversation domain model.

use super::message::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of input characters kept when deriving a conversation title.
pub const TITLE_PREFIX_CHARS: usize = 20;

/// Derives a conversation title from the first user input.
///
/// Takes the first [`TITLE_PREFIX_CHARS`] characters, uppercases them and
/// appends `...`.
pub fn derive_title(input: &str) -> String {
    let prefix: String = input.chars().take(TITLE_PREFIX_CHARS).collect();
    format!("{}...", prefix.to_uppercase())
}

/// An ordered dialogue with one or more personas.
///
/// `messages` is append-only; the only way to remove messages is to delete
/// the whole conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier (UUID format)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Primary persona id
    pub persona: String,
    /// Full active persona set for multi-persona conversations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personas: Option<Vec<String>>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    /// Milliseconds since the Unix epoch, refreshed on every append
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_note_id: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation titled from `first_input`.
    ///
    /// `personas` must be non-empty; its first entry becomes the primary
    /// persona.
    pub fn new(first_input: &str, personas: &[String], now: i64) -> Self {
        let primary = personas.first().cloned().unwrap_or_default();
        Self {
            id: Uuid::new_v4().to_string(),
            title: derive_title(first_input),
            messages: Vec::new(),
            tags: Vec::new(),
            persona: primary,
            personas: Some(personas.to_vec()),
            created_at: now,
            updated_at: now,
            pinned_note_id: None,
        }
    }

    /// Appends a message and refreshes `updated_at`.
    pub fn push_message(&mut self, message: Message, now: i64) {
        self.messages.push(message);
        self.updated_at = now;
    }

    /// Returns the active persona set, falling back to the primary persona.
    pub fn persona_set(&self) -> Vec<String> {
        match &self.personas {
            Some(personas) if !personas.is_empty() => personas.clone(),
            _ => vec![self.persona.clone()],
        }
    }

    /// Returns the content of the last `n` messages in order.
    pub fn last_contents(&self, n: usize) -> Vec<&str> {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..]
            .iter()
            .map(|m| m.content.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title_truncates_and_uppercases() {
        assert_eq!(
            derive_title("what is the nature of virtue?"),
            "WHAT IS THE NATURE O..."
        );
        assert_eq!(derive_title("short"), "SHORT...");
    }

    #[test]
    fn test_derive_title_counts_characters_not_bytes() {
        let input = "é".repeat(25);
        let title = derive_title(&input);
        assert_eq!(title.chars().count(), 23);
    }

    #[test]
    fn test_new_conversation_uses_first_persona() {
        let personas = vec!["Socratic".to_string(), "Stoic".to_string()];
        let conv = Conversation::new("hello", &personas, 100);
        assert_eq!(conv.persona, "Socratic");
        assert_eq!(conv.personas.as_deref(), Some(personas.as_slice()));
        assert_eq!(conv.created_at, 100);
        assert_eq!(conv.updated_at, 100);
        assert!(conv.messages.is_empty());
    }

    #[test]
    fn test_push_message_refreshes_updated_at() {
        let mut conv = Conversation::new("hello", &["Stoic".to_string()], 100);
        conv.push_message(Message::user("hello", 150), 150);
        assert_eq!(conv.updated_at, 150);
        assert_eq!(conv.messages.len(), 1);
    }

    #[test]
    fn test_last_contents() {
        let mut conv = Conversation::new("a", &["Stoic".to_string()], 0);
        conv.push_message(Message::user("one", 1), 1);
        assert_eq!(conv.last_contents(2), vec!["one"]);
        conv.push_message(Message::user("two", 2), 2);
        conv.push_message(Message::user("three", 3), 3);
        assert_eq!(conv.last_contents(2), vec!["two", "three"]);
    }

    #[test]
    fn test_persona_set_falls_back_to_primary() {
        let json = r#"{"id":"c","title":"T","messages":[],"tags":[],"persona":"Stoic","createdAt":1,"updatedAt":1}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.persona_set(), vec!["Stoic".to_string()]);
    }
}
