//! Gemini adapters for the model-call collaborators.

pub mod gemini_api_agent;
pub mod gemini_concept_extractor;

pub use gemini_api_agent::GeminiApiAgent;
pub use gemini_concept_extractor::GeminiConceptExtractor;
