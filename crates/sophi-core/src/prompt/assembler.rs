//! System-instruction assembly.
//!
//! Builds the layered system instruction for one persona from named
//! fragments. Assembly is pure: the same inputs always produce the same
//! string, and nothing here touches I/O or the clock.

use super::protocol::UNIVERSAL_DEBATE_PROTOCOL;
use crate::conversation::Conversation;
use crate::persona::{PersonaConfig, baked_in_dna};

/// Maximum number of other conversations summarised in the recall section.
pub const RECALL_LIMIT: usize = 3;

/// Number of trailing messages quoted per recalled conversation.
const KEY_EXCHANGE_MESSAGES: usize = 2;

/// Everything the assembler needs for one persona.
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub persona: &'a PersonaConfig,
    /// User-editable DNA override for this persona
    pub augmentation_override: Option<&'a str>,
    /// Global behavioral directive
    pub user_profile: Option<&'a str>,
    /// Conversations already filtered by [`select_recall_candidates`]
    pub recall_candidates: &'a [&'a Conversation],
    /// Content of the active context note
    pub session_note: Option<&'a str>,
}

/// Selects conversations worth recalling for `persona_id`.
///
/// Keeps conversations with at least one message whose primary persona
/// differs from `persona_id`, most recently updated first, at most `limit`.
/// `persona_id` is the id as stored on conversations, before any fallback
/// resolution. The conversation being answered is never its own recall.
pub fn select_recall_candidates<'a>(
    conversations: &'a [Conversation],
    persona_id: &str,
    current_conversation_id: Option<&str>,
    limit: usize,
) -> Vec<&'a Conversation> {
    let mut candidates: Vec<&Conversation> = conversations
        .iter()
        .filter(|c| c.persona != persona_id && !c.messages.is_empty())
        .filter(|c| current_conversation_id != Some(c.id.as_str()))
        .collect();
    // Stable sort keeps storage order among equal timestamps.
    candidates.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    candidates.truncate(limit);
    candidates
}

/// Assembles the system instruction for one persona.
///
/// Sections, in order: base instruction, debate protocol, user profile,
/// cross-conversation recall, DNA augmentation, session context. Optional
/// sections whose content is blank are omitted entirely.
pub fn assemble_system_instruction(inputs: &PromptInputs<'_>) -> String {
    let mut instruction = format!(
        "{}\n{}",
        inputs.persona.base_instruction, UNIVERSAL_DEBATE_PROTOCOL
    );

    if let Some(profile) = non_blank(inputs.user_profile) {
        instruction.push_str(&format!(
            "\n\n[GLOBAL_USER_PROFILE_DIRECTIVE]:\n\"{profile}\"\n(Always apply these behavioral rules to your output style.)"
        ));
    }

    if let Some(recall) = recall_section(inputs.recall_candidates) {
        instruction.push_str(&recall);
    }

    let dna = combined_dna(baked_in_dna(&inputs.persona.id), inputs.augmentation_override);
    if !dna.is_empty() {
        instruction.push_str(&format!("\n\n[AUGMENTED_PERSONA_DNA]:\n\"{dna}\""));
    }

    if let Some(note) = non_blank(inputs.session_note) {
        instruction.push_str(&format!("\n\n[SESSION_CONTEXT_INGESTION]:\n\"{note}\""));
    }

    instruction
}

fn recall_section(candidates: &[&Conversation]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let lines: Vec<String> = candidates
        .iter()
        .map(|c| {
            format!(
                "- MATRIX: {} | TOPIC: {} | KEY_EXCHANGE: {}",
                c.persona,
                c.title,
                c.last_contents(KEY_EXCHANGE_MESSAGES).join(" | ")
            )
        })
        .collect();
    Some(format!(
        "\n\n[CROSS_MATRIX_NEURAL_RECALL]:\nThe user has previously engaged in other philosophical matrices. Use this context to avoid repetition and provide a cohesive experience:\n{}\n",
        lines.join("\n")
    ))
}

/// Joins baked-in DNA and the user override with a blank line, skipping blanks.
fn combined_dna(baked: &str, user_override: Option<&str>) -> String {
    [Some(baked), user_override]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
