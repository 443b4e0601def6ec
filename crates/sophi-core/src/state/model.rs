//! The persisted application aggregate.
//!
//! `SophiData` is the single source of truth for conversations, concepts,
//! notes, persona augmentations and user preferences. It is only mutated
//! through the named operations below; callers never poke at the collections
//! directly when a named operation exists.

use crate::concept::{Concept, ExtractedConcept};
use crate::conversation::{Conversation, Message};
use crate::error::{Result, SophiError};
use crate::note::Note;
use crate::persona::{CustomPersona, DEFAULT_PERSONA_ID, find_builtin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Result of merging extracted concepts into the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConceptMergeSummary {
    /// Concepts created by this merge
    pub added: usize,
    /// Existing concepts that gained a new connection
    pub connected: usize,
}

impl ConceptMergeSummary {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.connected == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SophiData {
    /// Conversations, most recently created first
    pub conversations: Vec<Conversation>,
    pub concepts: Vec<Concept>,
    pub notes: Vec<Note>,
    pub current_conversation_id: Option<String>,
    pub active_persona: String,
    pub active_context_note_id: Option<String>,
    /// Persona id to user-supplied DNA override
    pub persona_augmentations: BTreeMap<String, String>,
    /// Global behavioral directive applied to every persona
    pub user_prompt: String,
    pub custom_personas: Vec<CustomPersona>,
    pub emoji_mode: bool,
}

impl Default for SophiData {
    fn default() -> Self {
        Self {
            conversations: Vec::new(),
            concepts: Vec::new(),
            notes: Vec::new(),
            current_conversation_id: None,
            active_persona: DEFAULT_PERSONA_ID.to_string(),
            active_context_note_id: None,
            persona_augmentations: BTreeMap::new(),
            user_prompt: String::new(),
            custom_personas: Vec::new(),
            emoji_mode: false,
        }
    }
}

impl SophiData {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Conversations
    // ============================================================================

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.current_conversation_id
            .as_deref()
            .and_then(|id| self.conversation(id))
    }

    /// Creates a conversation for `first_input`, makes it current and returns its id.
    pub fn create_conversation(
        &mut self,
        first_input: &str,
        personas: &[String],
        now: i64,
    ) -> Result<String> {
        if personas.is_empty() {
            return Err(SophiError::invalid_input(
                "a conversation needs at least one persona",
            ));
        }
        let conversation = Conversation::new(first_input, personas, now);
        let id = conversation.id.clone();
        self.conversations.insert(0, conversation);
        self.current_conversation_id = Some(id.clone());
        Ok(id)
    }

    /// Appends `message` to a conversation and refreshes its `updated_at`.
    pub fn append_message(&mut self, conversation_id: &str, message: Message, now: i64) -> Result<()> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| SophiError::not_found("Conversation", conversation_id))?;
        conversation.push_message(message, now);
        Ok(())
    }

    /// Removes a conversation; clears the current pointer when it pointed at it.
    pub fn delete_conversation(&mut self, conversation_id: &str) -> Result<Conversation> {
        let index = self
            .conversations
            .iter()
            .position(|c| c.id == conversation_id)
            .ok_or_else(|| SophiError::not_found("Conversation", conversation_id))?;
        let removed = self.conversations.remove(index);
        if self.current_conversation_id.as_deref() == Some(conversation_id) {
            self.current_conversation_id = None;
        }
        Ok(removed)
    }

    /// Points the current selection at a conversation.
    ///
    /// `None` starts a fresh session: the next send lazily creates a conversation.
    pub fn select_conversation(&mut self, conversation_id: Option<&str>) -> Result<()> {
        if let Some(id) = conversation_id {
            if self.conversation(id).is_none() {
                return Err(SophiError::not_found("Conversation", id));
            }
        }
        self.current_conversation_id = conversation_id.map(str::to_string);
        Ok(())
    }

    // ============================================================================
    // Concepts
    // ============================================================================

    /// Merges extraction results into the cache, keyed case-insensitively by label.
    ///
    /// Known labels gain `conversation_id` as a connection (at most once);
    /// unknown labels become new concepts. Blank labels are skipped.
    pub fn merge_concepts(
        &mut self,
        extracted: &[ExtractedConcept],
        conversation_id: &str,
    ) -> ConceptMergeSummary {
        let mut summary = ConceptMergeSummary::default();
        for candidate in extracted {
            if candidate.label.trim().is_empty() {
                continue;
            }
            match self
                .concepts
                .iter_mut()
                .find(|c| c.matches_label(&candidate.label))
            {
                Some(existing) => {
                    if existing.connect(conversation_id) {
                        summary.connected += 1;
                    }
                }
                None => {
                    self.concepts
                        .push(Concept::from_extracted(candidate, conversation_id));
                    summary.added += 1;
                }
            }
        }
        summary
    }

    pub fn concept_labels(&self) -> Vec<String> {
        self.concepts.iter().map(|c| c.label.clone()).collect()
    }

    // ============================================================================
    // Notes
    // ============================================================================

    pub fn add_note(&mut self, title: &str, content: &str, now: i64) -> String {
        let note = Note::new(title, content, now);
        let id = note.id.clone();
        self.notes.insert(0, note);
        id
    }

    /// Deletes a note; deleting the active note clears the active pointer.
    pub fn delete_note(&mut self, note_id: &str) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| SophiError::not_found("Note", note_id))?;
        if self.active_context_note_id.as_deref() == Some(note_id) {
            self.active_context_note_id = None;
        }
        Ok(self.notes.remove(index))
    }

    /// Activates a note, or deactivates it when it is already active.
    ///
    /// Returns whether the note is active after the call.
    pub fn toggle_active_note(&mut self, note_id: &str) -> Result<bool> {
        if !self.notes.iter().any(|n| n.id == note_id) {
            return Err(SophiError::not_found("Note", note_id));
        }
        if self.active_context_note_id.as_deref() == Some(note_id) {
            self.active_context_note_id = None;
            Ok(false)
        } else {
            self.active_context_note_id = Some(note_id.to_string());
            Ok(true)
        }
    }

    pub fn active_note(&self) -> Option<&Note> {
        let id = self.active_context_note_id.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }

    // ============================================================================
    // Persona settings
    // ============================================================================

    /// Stores a DNA override for `persona_id`; blank text removes the override.
    pub fn set_augmentation(&mut self, persona_id: &str, text: &str) {
        if text.trim().is_empty() {
            self.persona_augmentations.remove(persona_id);
        } else {
            self.persona_augmentations
                .insert(persona_id.to_string(), text.to_string());
        }
    }

    pub fn augmentation(&self, persona_id: &str) -> Option<&str> {
        self.persona_augmentations.get(persona_id).map(String::as_str)
    }

    pub fn set_user_prompt(&mut self, text: &str) {
        self.user_prompt = text.to_string();
    }

    pub fn set_active_persona(&mut self, persona_id: &str) {
        self.active_persona = persona_id.to_string();
    }

    /// Registers a user-defined persona.
    ///
    /// Names must be non-blank and must not shadow a built-in or another
    /// custom persona, since the name doubles as the persona id.
    pub fn add_custom_persona(
        &mut self,
        name: &str,
        description: &str,
        instruction: &str,
        color: &str,
        now: i64,
    ) -> Result<CustomPersona> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SophiError::invalid_input("persona name must not be empty"));
        }
        if instruction.trim().is_empty() {
            return Err(SophiError::invalid_input(
                "persona instruction must not be empty",
            ));
        }
        if find_builtin(name).is_some() || self.custom_personas.iter().any(|p| p.name == name) {
            return Err(SophiError::invalid_input(format!(
                "persona '{name}' already exists"
            )));
        }

        let persona = CustomPersona {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            instruction: instruction.to_string(),
            color: color.to_string(),
            created_at: now,
        };
        self.custom_personas.push(persona.clone());
        Ok(persona)
    }

    /// Deletes a custom persona by id.
    ///
    /// If it was the active persona, the active persona resets to the default.
    pub fn delete_custom_persona(&mut self, persona_id: &str) -> Result<CustomPersona> {
        let index = self
            .custom_personas
            .iter()
            .position(|p| p.id == persona_id)
            .ok_or_else(|| SophiError::not_found("CustomPersona", persona_id))?;
        let removed = self.custom_personas.remove(index);
        if self.active_persona == removed.name {
            self.active_persona = DEFAULT_PERSONA_ID.to_string();
        }
        Ok(removed)
    }

    pub fn set_emoji_mode(&mut self, enabled: bool) {
        self.emoji_mode = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::MessageRole;

    fn stoic() -> Vec<String> {
        vec!["Stoic".to_string()]
    }

    fn extracted(label: &str) -> ExtractedConcept {
        ExtractedConcept {
            label: label.to_string(),
            description: format!("about {label}"),
            category: Some("Ethics".to_string()),
            importance: Some(3),
        }
    }

    #[test]
    fn test_default_state() {
        let data = SophiData::new();
        assert_eq!(data.active_persona, DEFAULT_PERSONA_ID);
        assert!(data.current_conversation().is_none());
        assert!(!data.emoji_mode);
    }

    #[test]
    fn test_create_conversation_becomes_current() {
        let mut data = SophiData::new();
        let first = data.create_conversation("first", &stoic(), 1).unwrap();
        let second = data.create_conversation("second", &stoic(), 2).unwrap();

        assert_eq!(data.current_conversation_id.as_deref(), Some(second.as_str()));
        assert_eq!(data.conversations[0].id, second);
        assert_eq!(data.conversations[1].id, first);
    }

    #[test]
    fn test_create_conversation_requires_persona() {
        let mut data = SophiData::new();
        let err = data.create_conversation("x", &[], 1).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_append_message_unknown_conversation() {
        let mut data = SophiData::new();
        let err = data
            .append_message("missing", Message::user("hi", 1), 1)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_append_message_updates_timestamp() {
        let mut data = SophiData::new();
        let id = data.create_conversation("hi", &stoic(), 1).unwrap();
        data.append_message(&id, Message::user("hi", 5), 5).unwrap();

        let conv = data.conversation(&id).unwrap();
        assert_eq!(conv.updated_at, 5);
        assert_eq!(conv.messages[0].role, MessageRole::User);
    }

    #[test]
    fn test_delete_current_conversation_clears_pointer() {
        let mut data = SophiData::new();
        let id = data.create_conversation("hi", &stoic(), 1).unwrap();
        data.delete_conversation(&id).unwrap();
        assert!(data.current_conversation_id.is_none());
        assert!(data.conversations.is_empty());
    }

    #[test]
    fn test_select_conversation() {
        let mut data = SophiData::new();
        let a = data.create_conversation("a", &stoic(), 1).unwrap();
        let _b = data.create_conversation("b", &stoic(), 2).unwrap();

        data.select_conversation(Some(&a)).unwrap();
        assert_eq!(data.current_conversation().unwrap().id, a);

        data.select_conversation(None).unwrap();
        assert!(data.current_conversation_id.is_none());

        assert!(data.select_conversation(Some("nope")).is_err());
    }

    #[test]
    fn test_merge_concepts_is_idempotent() {
        let mut data = SophiData::new();
        let batch = vec![extracted("Free Will"), extracted("Determinism")];

        let first = data.merge_concepts(&batch, "c1");
        assert_eq!(first.added, 2);
        let snapshot = data.concepts.clone();

        let second = data.merge_concepts(&batch, "c1");
        assert!(second.is_noop());
        assert_eq!(data.concepts, snapshot);
    }

    #[test]
    fn test_merge_concepts_case_insensitive_connects() {
        let mut data = SophiData::new();
        data.merge_concepts(&[extracted("Free Will")], "c1");
        let summary = data.merge_concepts(&[extracted("free will"), extracted("  ")], "c2");

        assert_eq!(summary, ConceptMergeSummary { added: 0, connected: 1 });
        assert_eq!(data.concepts.len(), 1);
        assert_eq!(data.concepts[0].label, "Free Will");
        assert_eq!(data.concepts[0].connections, vec!["c1", "c2"]);
    }

    #[test]
    fn test_note_toggle_and_delete() {
        let mut data = SophiData::new();
        let id = data.add_note("Axioms", "virtue is the only good", 1);

        assert!(data.toggle_active_note(&id).unwrap());
        assert_eq!(data.active_note().unwrap().content, "virtue is the only good");

        assert!(!data.toggle_active_note(&id).unwrap());
        assert!(data.active_note().is_none());

        data.toggle_active_note(&id).unwrap();
        data.delete_note(&id).unwrap();
        assert!(data.active_context_note_id.is_none());
        assert!(data.toggle_active_note(&id).is_err());
    }

    #[test]
    fn test_set_augmentation_blank_removes() {
        let mut data = SophiData::new();
        data.set_augmentation("Stoic", "Seneca's letters");
        assert_eq!(data.augmentation("Stoic"), Some("Seneca's letters"));

        data.set_augmentation("Stoic", "   ");
        assert_eq!(data.augmentation("Stoic"), None);
    }

    #[test]
    fn test_deleting_active_custom_persona_falls_back() {
        let mut data = SophiData::new();
        let persona = data
            .add_custom_persona("Oracle", "sees all", "You are the Oracle.", "", 1)
            .unwrap();
        data.set_active_persona("Oracle");

        data.delete_custom_persona(&persona.id).unwrap();
        assert_eq!(data.active_persona, DEFAULT_PERSONA_ID);
        assert!(data.custom_personas.is_empty());
    }

    #[test]
    fn test_deleting_inactive_custom_persona_keeps_active() {
        let mut data = SophiData::new();
        let persona = data
            .add_custom_persona("Oracle", "", "You are the Oracle.", "", 1)
            .unwrap();
        data.set_active_persona("Socratic");

        data.delete_custom_persona(&persona.id).unwrap();
        assert_eq!(data.active_persona, "Socratic");
    }

    #[test]
    fn test_add_custom_persona_rejects_collisions() {
        let mut data = SophiData::new();
        assert!(data.add_custom_persona("Stoic", "", "x", "", 1).is_err());
        assert!(data.add_custom_persona(" ", "", "x", "", 1).is_err());
        data.add_custom_persona("Oracle", "", "x", "", 1).unwrap();
        assert!(data.add_custom_persona("Oracle", "", "y", "", 2).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut data = SophiData::new();
        data.set_emoji_mode(true);
        data.set_user_prompt("be brief");
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["activePersona"], "Stoic");
        assert_eq!(json["emojiMode"], true);
        assert_eq!(json["userPrompt"], "be brief");
        assert!(json["currentConversationId"].is_null());
        assert!(json["personaAugmentations"].is_object());
    }

    #[test]
    fn test_deserializes_partial_document() {
        let json = r#"{"conversations":[],"activePersona":"Taoist","userPersonality":"ignored"}"#;
        let data: SophiData = serde_json::from_str(json).unwrap();
        assert_eq!(data.active_persona, "Taoist");
        assert!(data.custom_personas.is_empty());
    }
}
