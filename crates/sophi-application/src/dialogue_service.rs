//! Dialogue orchestration.
//!
//! `DialogueService` owns the turn lifecycle: lazily creating conversations,
//! recording the user message, fanning the turn out to every active persona,
//! turning each branch result into an assistant message and scheduling
//! concept extraction in the background.

use crate::background::BackgroundTasks;
use crate::store::SophiStore;
use futures::future::join_all;
use sophi_core::agent::{AgentError, ChatAgent, ChatTurn, ConceptExtractor, GenerateRequest};
use sophi_core::clock::now_millis;
use sophi_core::conversation::{Message, MessageRole};
use sophi_core::error::{Result, SophiError};
use sophi_core::persona::{PersonaConfig, resolve_persona};
use sophi_core::prompt::protocol::THOUGHT_EXPERIMENT_INSTRUCTION;
use sophi_core::prompt::{
    PromptInputs, RECALL_LIMIT, assemble_system_instruction, select_recall_candidates,
};
use sophi_core::response::parse_response;
use sophi_core::state::SophiData;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, broadcast};

/// Shown when a model call fails for any reason other than credentials.
pub const GENERIC_FAILURE_TEXT: &str = "API Error: Communication with the reasoning matrix failed.";

/// Shown when a model call fails because the API key is missing or rejected.
pub const AUTH_FAILURE_TEXT: &str = "API Error: The reasoning matrix rejected the credentials. \
Set SOPHI_API_KEY (or GEMINI_API_KEY) or add your key to secret.json under gemini.api_key, then retry.";

/// Returned by thought-experiment generation when the model call fails.
pub const CONTEMPLATION_FAILED_TEXT: &str = "Contemplation failed.";

/// Characters of conversation text fed to thought-experiment generation.
pub const THOUGHT_EXPERIMENT_CONTEXT_CHARS: usize = 2000;

/// Lifecycle of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// User message recorded, persona calls being prepared
    Sending,
    /// Persona calls in flight
    FannedOut,
    /// All replies recorded
    Settled,
}

/// Phase change notification for front-ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPhaseEvent {
    pub conversation_id: String,
    pub phase: TurnPhase,
}

/// One persona's contribution to a turn.
#[derive(Debug, Clone)]
pub struct PersonaReply {
    /// Resolved persona id
    pub persona_id: String,
    /// The assistant message appended for this persona
    pub message: Message,
    /// The failure behind a synthetic error message
    pub error: Option<AgentError>,
}

impl PersonaReply {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of a settled turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation_id: String,
    /// True when this turn lazily created the conversation
    pub created_conversation: bool,
    pub user_message: Message,
    /// Replies in persona-list order
    pub replies: Vec<PersonaReply>,
}

pub struct DialogueService {
    store: Arc<SophiStore>,
    agent: Arc<dyn ChatAgent>,
    extractor: Arc<dyn ConceptExtractor>,
    background: Arc<BackgroundTasks>,
    turn_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
    phases: broadcast::Sender<TurnPhaseEvent>,
}

impl DialogueService {
    pub fn new(
        store: Arc<SophiStore>,
        agent: Arc<dyn ChatAgent>,
        extractor: Arc<dyn ConceptExtractor>,
        background: Arc<BackgroundTasks>,
    ) -> Self {
        let (phases, _) = broadcast::channel(64);
        Self {
            store,
            agent,
            extractor,
            background,
            turn_locks: StdMutex::new(HashMap::new()),
            phases,
        }
    }

    pub fn store(&self) -> &Arc<SophiStore> {
        &self.store
    }

    pub fn background(&self) -> &Arc<BackgroundTasks> {
        &self.background
    }

    /// Subscribes to turn phase changes.
    pub fn subscribe_phases(&self) -> broadcast::Receiver<TurnPhaseEvent> {
        self.phases.subscribe()
    }

    /// Runs one user turn against every persona in `active_personas`.
    ///
    /// `conversation_id = None` lazily creates a conversation titled from
    /// `text`. Model failures never surface as `Err`: each failed branch is
    /// recorded as an assistant message flagged as an error. `Err` is reserved
    /// for caller mistakes (blank input, empty persona set, unknown id).
    ///
    /// Turns on the same conversation are serialized; a second turn starts
    /// only after the first has settled.
    pub async fn send_turn(
        &self,
        conversation_id: Option<&str>,
        text: &str,
        active_personas: &[String],
    ) -> Result<TurnOutcome> {
        if text.trim().is_empty() {
            return Err(SophiError::invalid_input("message must not be empty"));
        }
        if active_personas.is_empty() {
            return Err(SophiError::invalid_input("at least one persona must be active"));
        }

        let (conversation_id, created_conversation) = match conversation_id {
            Some(id) => {
                let exists = self.store.read(|d| d.conversation(id).is_some()).await;
                if !exists {
                    return Err(SophiError::not_found("Conversation", id));
                }
                (id.to_string(), false)
            }
            None => {
                let id = self
                    .store
                    .update(|d| d.create_conversation(text, active_personas, now_millis()))
                    .await?;
                tracing::info!("[DialogueService] Created conversation {}", id);
                (id, true)
            }
        };

        let turn_lock = self.turn_lock(&conversation_id);
        let _turn = turn_lock.lock().await;

        // Phase: Sending
        let user_message = Message::user(text, now_millis());
        let snapshot = {
            let message = user_message.clone();
            let id = conversation_id.clone();
            self.store
                .update(move |d| {
                    d.append_message(&id, message, now_millis())?;
                    Ok(d.clone())
                })
                .await?
        };
        self.emit(&conversation_id, TurnPhase::Sending);

        let history: Vec<Message> = snapshot
            .conversation(&conversation_id)
            .map(|c| c.messages[..c.messages.len().saturating_sub(1)].to_vec())
            .unwrap_or_default();

        let multi_persona = active_personas.len() > 1;
        let branches: Vec<(PersonaConfig, GenerateRequest)> = active_personas
            .iter()
            .map(|id| self.prepare_branch(&snapshot, &conversation_id, id, &history, text))
            .collect();

        // Phase: FannedOut
        self.emit(&conversation_id, TurnPhase::FannedOut);
        tracing::info!(
            "[DialogueService] Turn on {} fanned out to {} persona(s)",
            conversation_id,
            branches.len()
        );

        let calls = branches.iter().map(|(_, request)| self.agent.generate(request.clone()));
        let results = join_all(calls).await;

        let replies: Vec<PersonaReply> = branches
            .into_iter()
            .zip(results)
            .map(|((persona, _), result)| {
                let tag = multi_persona.then(|| persona.id.clone());
                match result {
                    Ok(response) => {
                        let parsed = parse_response(&response.text);
                        PersonaReply {
                            message: Message::assistant(
                                parsed.cleaned_text.clone(),
                                now_millis(),
                                tag,
                                parsed.metadata(),
                            ),
                            persona_id: persona.id,
                            error: None,
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            "[DialogueService] Persona {} failed on {}: {}",
                            persona.id,
                            conversation_id,
                            err
                        );
                        PersonaReply {
                            message: Message::failure(failure_text(&err), now_millis(), tag),
                            persona_id: persona.id,
                            error: Some(err),
                        }
                    }
                }
            })
            .collect();

        {
            let id = conversation_id.clone();
            let messages: Vec<Message> = replies.iter().map(|r| r.message.clone()).collect();
            self.store
                .update(move |d| {
                    for message in messages {
                        d.append_message(&id, message, now_millis())?;
                    }
                    Ok(())
                })
                .await?;
        }

        self.schedule_concept_extraction(&conversation_id, text, &replies);

        // Phase: Settled
        self.emit(&conversation_id, TurnPhase::Settled);
        tracing::info!(
            "[DialogueService] Turn on {} settled ({} failed)",
            conversation_id,
            replies.iter().filter(|r| r.is_error()).count()
        );

        Ok(TurnOutcome {
            conversation_id,
            created_conversation,
            user_message,
            replies,
        })
    }

    /// Asks the model for a short thought experiment grounded in a conversation.
    ///
    /// Uses the last 2000 characters of the conversation's message text.
    /// Model failures yield [`CONTEMPLATION_FAILED_TEXT`] rather than `Err`.
    pub async fn generate_thought_experiment(&self, conversation_id: &str) -> Result<String> {
        let context = self
            .store
            .read(|d| {
                d.conversation(conversation_id).map(|c| {
                    let joined = c
                        .messages
                        .iter()
                        .map(|m| m.content.as_str())
                        .collect::<Vec<_>>()
                        .join("\n");
                    tail_chars(&joined, THOUGHT_EXPERIMENT_CONTEXT_CHARS).to_string()
                })
            })
            .await
            .ok_or_else(|| SophiError::not_found("Conversation", conversation_id))?;

        let request = GenerateRequest {
            system_instruction: THOUGHT_EXPERIMENT_INSTRUCTION.to_string(),
            history: Vec::new(),
            user_input: format!(
                "Generate a mini thought experiment based on this context:\n\n{context}"
            ),
        };

        match self.agent.generate(request).await {
            Ok(response) if !response.text.trim().is_empty() => Ok(response.text),
            Ok(_) => Ok(CONTEMPLATION_FAILED_TEXT.to_string()),
            Err(err) => {
                tracing::warn!("[DialogueService] Thought experiment failed: {}", err);
                Ok(CONTEMPLATION_FAILED_TEXT.to_string())
            }
        }
    }

    fn turn_lock(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .turn_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        acquire_turn_lock(&mut locks, conversation_id)
    }

    fn emit(&self, conversation_id: &str, phase: TurnPhase) {
        tracing::debug!("[DialogueService] {} -> {:?}", conversation_id, phase);
        // No subscribers is fine.
        let _ = self.phases.send(TurnPhaseEvent {
            conversation_id: conversation_id.to_string(),
            phase,
        });
    }

    /// Resolves one persona and assembles its model request from `snapshot`.
    fn prepare_branch(
        &self,
        snapshot: &SophiData,
        conversation_id: &str,
        persona_id: &str,
        history: &[Message],
        user_input: &str,
    ) -> (PersonaConfig, GenerateRequest) {
        let resolution = resolve_persona(persona_id, &snapshot.custom_personas);
        if resolution.is_fallback() {
            tracing::warn!(
                "[DialogueService] Unknown persona '{}', answering as {}",
                persona_id,
                resolution.config().id
            );
        }
        let persona = resolution.into_config();

        // Conversations store the requested id, not the resolved one.
        let recall = select_recall_candidates(
            &snapshot.conversations,
            persona_id,
            Some(conversation_id),
            RECALL_LIMIT,
        );
        let inputs = PromptInputs {
            persona: &persona,
            augmentation_override: snapshot.augmentation(&persona.id),
            user_profile: Some(snapshot.user_prompt.as_str()),
            recall_candidates: &recall,
            session_note: snapshot.active_note().map(|n| n.content.as_str()),
        };
        let system_instruction = assemble_system_instruction(&inputs);

        let request = GenerateRequest {
            system_instruction,
            history: history_for(&persona.id, history),
            user_input: user_input.to_string(),
        };
        (persona, request)
    }

    /// Submits the concept-extraction job for a settled turn.
    ///
    /// The dialogue text is the user input plus the primary persona's reply,
    /// or the first successful reply when the primary failed. Nothing is
    /// scheduled when every branch failed.
    fn schedule_concept_extraction(
        &self,
        conversation_id: &str,
        user_text: &str,
        replies: &[PersonaReply],
    ) {
        let Some(reply) = replies.iter().find(|r| !r.is_error()) else {
            tracing::debug!(
                target: "concept_extraction",
                "[DialogueService] No successful reply on {}, skipping extraction",
                conversation_id
            );
            return;
        };

        let dialogue_text = format!("{}\n\n{}", user_text, reply.message.content);
        let conversation_id = conversation_id.to_string();
        let store = Arc::clone(&self.store);
        let extractor = Arc::clone(&self.extractor);

        self.background.submit("concept_extraction", async move {
            let labels = store.read(|d| d.concept_labels()).await;
            match extractor.extract_concepts(&dialogue_text, &labels).await {
                Ok(extracted) => {
                    let merged = store
                        .update(|d| Ok(d.merge_concepts(&extracted, &conversation_id)))
                        .await;
                    match merged {
                        Ok(summary) => tracing::debug!(
                            target: "concept_extraction",
                            "[DialogueService] Merged concepts for {}: {} added, {} connected",
                            conversation_id,
                            summary.added,
                            summary.connected
                        ),
                        Err(e) => tracing::warn!(
                            target: "concept_extraction",
                            "[DialogueService] Concept merge failed: {}",
                            e
                        ),
                    }
                }
                Err(e) => tracing::warn!(
                    target: "concept_extraction",
                    "[DialogueService] Concept extraction failed for {}: {}",
                    conversation_id,
                    e
                ),
            }
        });
    }
}

/// Maps prior messages to model turns from `persona_id`'s point of view.
///
/// Replies tagged with another persona are prefixed with that persona's id
/// so each persona can tell its own words from the others'.
fn history_for(persona_id: &str, history: &[Message]) -> Vec<ChatTurn> {
    history
        .iter()
        .map(|m| {
            let content = match (&m.role, &m.persona) {
                (MessageRole::Assistant, Some(author)) if author != persona_id => {
                    format!("{}: {}", author, m.content)
                }
                _ => m.content.clone(),
            };
            ChatTurn {
                role: m.role,
                content,
            }
        })
        .collect()
}

/// User-visible text for a failed branch.
pub fn failure_text(err: &AgentError) -> &'static str {
    if err.is_auth_error() {
        AUTH_FAILURE_TEXT
    } else {
        GENERIC_FAILURE_TEXT
    }
}

/// Returns the last `max_chars` characters of `text`.
fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    let skip = total - max_chars;
    let start = text
        .char_indices()
        .nth(skip)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[start..]
}

/// Hands out the per-conversation turn lock, dropping entries no turn holds.
///
/// Clones are only made under the map's mutex, so a strong count of one
/// means no caller can still be waiting on that lock.
fn acquire_turn_lock(
    locks: &mut HashMap<String, Arc<Mutex<()>>>,
    conversation_id: &str,
) -> Arc<Mutex<()>> {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    Arc::clone(
        locks
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(()))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophi_core::conversation::MessageMetadata;

    #[test]
    fn test_history_prefixes_other_personas() {
        let history = vec![
            Message::user("why?", 1),
            Message::assistant("because", 2, Some("Stoic".into()), MessageMetadata::default()),
            Message::assistant("who knows", 3, Some("Skeptic".into()), MessageMetadata::default()),
        ];

        let turns = history_for("Stoic", &history);
        assert_eq!(turns[0].content, "why?");
        assert_eq!(turns[1].content, "because");
        assert_eq!(turns[2].content, "Skeptic: who knows");
        assert_eq!(turns[2].role, MessageRole::Assistant);
    }

    #[test]
    fn test_idle_turn_locks_are_pruned() {
        let mut locks = HashMap::new();
        let first = acquire_turn_lock(&mut locks, "a");
        let again = acquire_turn_lock(&mut locks, "a");
        assert!(Arc::ptr_eq(&first, &again));

        let other = acquire_turn_lock(&mut locks, "b");
        assert_eq!(locks.len(), 2);

        drop(first);
        drop(again);
        let _c = acquire_turn_lock(&mut locks, "c");
        assert!(!locks.contains_key("a"));
        assert!(locks.contains_key("b"));
        assert_eq!(locks.len(), 2);
        drop(other);
    }

    #[test]
    fn test_failure_text_classification() {
        assert_eq!(
            failure_text(&AgentError::Configuration("missing".into())),
            AUTH_FAILURE_TEXT
        );
        assert_eq!(
            failure_text(&AgentError::ExecutionFailed("timeout".into())),
            GENERIC_FAILURE_TEXT
        );
    }

    #[test]
    fn test_tail_chars() {
        assert_eq!(tail_chars("abcdef", 10), "abcdef");
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(tail_chars("ééééé", 2), "éé");
    }
}
