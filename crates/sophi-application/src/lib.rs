//! Application layer for Sophi.
//!
//! Coordinates the domain model in `sophi-core` with the model and storage
//! adapters: the shared store, turn orchestration, background jobs and
//! debounced persistence.

pub mod background;
pub mod dialogue_service;
pub mod persistence;
pub mod store;

pub use background::BackgroundTasks;
pub use dialogue_service::{DialogueService, PersonaReply, TurnOutcome, TurnPhase, TurnPhaseEvent};
pub use persistence::DebouncedPersister;
pub use store::SophiStore;
