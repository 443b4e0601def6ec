//! Model-call collaborators.
//!
//! The core only knows these traits; concrete HTTP adapters live in
//! `sophi-interaction`.

use crate::concept::ExtractedConcept;
use crate::conversation::MessageRole;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by model-call adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The adapter is not usable as configured (missing API key, bad model name)
    #[error("Agent configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a failure or the transport broke down
    #[error("Process error (status {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The provider answered but the payload was not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Creates a process error carrying a server-provided retry delay.
    pub fn process_error_with_retry_after(
        status_code: u16,
        message: impl Into<String>,
        is_retryable: bool,
        retry_after: Duration,
    ) -> Self {
        Self::ProcessError {
            status_code: Some(status_code),
            message: message.into(),
            is_retryable,
            retry_after: Some(retry_after),
        }
    }

    /// Returns true for failures the user can only fix by supplying credentials.
    ///
    /// Covers configuration errors, HTTP 401/403 and provider messages that
    /// mention the API key.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::ProcessError {
                status_code: Some(401 | 403),
                ..
            } => true,
            Self::ProcessError { message, .. }
            | Self::ExecutionFailed(message)
            | Self::Other(message) => message.contains("API key"),
            Self::InvalidResponse(_) => false,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }
}

/// One prior message in the history sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

/// A single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub system_instruction: String,
    /// Prior messages, oldest first, excluding `user_input`
    pub history: Vec<ChatTurn>,
    pub user_input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: String,
}

/// Text-generation collaborator.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AgentError>;
}

/// Concept-extraction collaborator.
#[async_trait]
pub trait ConceptExtractor: Send + Sync {
    /// Extracts concepts from `dialogue_text`.
    ///
    /// `existing_labels` lets the adapter nudge the model toward reusing
    /// labels already in the cache.
    async fn extract_concepts(
        &self,
        dialogue_text: &str,
        existing_labels: &[String],
    ) -> Result<Vec<ExtractedConcept>, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(status: Option<u16>, message: &str) -> AgentError {
        AgentError::ProcessError {
            status_code: status,
            message: message.to_string(),
            is_retryable: false,
            retry_after: None,
        }
    }

    #[test]
    fn test_auth_error_classification() {
        assert!(AgentError::Configuration("no key".into()).is_auth_error());
        assert!(process(Some(401), "unauthorized").is_auth_error());
        assert!(process(Some(403), "forbidden").is_auth_error());
        assert!(process(Some(400), "INVALID_ARGUMENT: API key not valid").is_auth_error());
        assert!(!process(Some(500), "internal").is_auth_error());
        assert!(!process(None, "connection reset").is_auth_error());
        assert!(!AgentError::InvalidResponse("API key".into()).is_auth_error());
    }

    #[test]
    fn test_retry_after_constructor() {
        let err = AgentError::process_error_with_retry_after(429, "slow down", true, Duration::from_secs(3));
        assert!(err.is_retryable());
        match err {
            AgentError::ProcessError { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(3)))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
