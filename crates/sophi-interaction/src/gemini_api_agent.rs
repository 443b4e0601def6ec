//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` with the persona system instruction,
//! the prior history mapped to `user`/`model` roles and the new user input.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use sophi_core::agent::{AgentError, ChatAgent, ChatTurn, GenerateRequest, GenerateResponse};
use sophi_core::config::{DEFAULT_MODEL_NAME, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, ModelSettings};
use sophi_core::conversation::MessageRole;
use sophi_infrastructure::ConfigService;
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Text returned when the provider answers without any candidate text.
pub const EMPTY_RESPONSE_TEXT: &str = "Neural connection timeout.";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    top_p: f32,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds an agent from `[model]` settings.
    ///
    /// A missing key is accepted here and reported as a configuration error on
    /// the first call, so the front-end can start and explain how to fix it.
    pub fn from_settings(settings: &ModelSettings, api_key: Option<String>) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| AgentError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let model = if settings.name.trim().is_empty() {
            DEFAULT_MODEL_NAME.to_string()
        } else {
            settings.name.clone()
        };

        Ok(Self {
            client,
            api_key: api_key.unwrap_or_default(),
            model,
            temperature: settings.temperature,
            top_p: settings.top_p,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Loads `config.toml` and the API key through `service`.
    pub fn from_config_service(service: &ConfigService) -> Result<Self, AgentError> {
        let config = service.load_config().map_err(|e| {
            AgentError::Configuration(format!("Failed to load config.toml: {e}"))
        })?;
        let api_key = service.resolve_api_key().map_err(|e| {
            AgentError::Configuration(format!("Failed to load secret.json: {e}"))
        })?;
        Self::from_settings(&config.model, api_key)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Builds the `generateContent` body for a chat turn.
    fn build_chat_request(&self, request: &GenerateRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(Content::from_turn).collect();
        contents.push(Content::user(&request.user_input));

        GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction::text(&request.system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                top_p: Some(self.top_p),
                ..Default::default()
            }),
        }
    }

    /// Sends a raw `generateContent` request and returns the first candidate text.
    pub(crate) async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<Option<String>, AgentError> {
        if !self.has_api_key() {
            return Err(AgentError::Configuration(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("Gemini API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AgentError::InvalidResponse(format!("Failed to parse Gemini response: {err}")))?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl ChatAgent for GeminiApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AgentError> {
        let body = self.build_chat_request(&request);
        tracing::debug!(
            "[GeminiApiAgent] generateContent model={} history={} instruction_len={}",
            self.model,
            request.history.len(),
            request.system_instruction.len()
        );
        let text = self
            .send_request(&body)
            .await?
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EMPTY_RESPONSE_TEXT.to_string());
        Ok(GenerateResponse { text })
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub(crate) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Debug)]
pub(crate) struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    pub(crate) fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn from_turn(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: turn.content.clone(),
            }],
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct SystemInstruction {
    parts: Vec<Part>,
}

impl SystemInstruction {
    pub(crate) fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    let content = response
        .candidates?
        .into_iter()
        .next()?
        .content?;
    let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
    Some(text)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if let Some(delay) = retry_after {
        AgentError::process_error_with_retry_after(status.as_u16(), message, is_retryable, delay)
    } else {
        AgentError::ProcessError {
            status_code: Some(status.as_u16()),
            message,
            is_retryable,
            retry_after: None,
        }
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are ignored; Gemini sends seconds.
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            system_instruction: "You are Marcus Aurelius.".to_string(),
            history: vec![
                ChatTurn {
                    role: MessageRole::User,
                    content: "What is good?".to_string(),
                },
                ChatTurn {
                    role: MessageRole::Assistant,
                    content: "Virtue alone.".to_string(),
                },
            ],
            user_input: "And pleasure?".to_string(),
        }
    }

    #[test]
    fn test_chat_request_body_shape() {
        let agent = GeminiApiAgent::new("key", "gemini-test");
        let body = serde_json::to_value(agent.build_chat_request(&request())).unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Marcus Aurelius."
        );
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "Virtue alone.");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "And pleasure?");

        let generation = &body["generationConfig"];
        assert!((generation["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((generation["topP"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert!(generation.get("responseMimeType").is_none());
    }

    #[test]
    fn test_settings_apply_to_generation_config() {
        let settings = ModelSettings {
            name: String::new(),
            temperature: 0.1,
            top_p: 0.5,
            request_timeout_secs: 5,
        };
        let agent = GeminiApiAgent::from_settings(&settings, None).unwrap();
        assert_eq!(agent.model(), DEFAULT_MODEL_NAME);
        assert!(!agent.has_api_key());

        let body = serde_json::to_value(agent.build_chat_request(&request())).unwrap();
        assert!((body["generationConfig"]["topP"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let agent = GeminiApiAgent::new("", "gemini-test");
        let err = agent.generate(request()).await.unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_map_http_error_uses_provider_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body.to_string(), None);

        match &err {
            AgentError::ProcessError {
                status_code,
                message,
                is_retryable,
                ..
            } => {
                assert_eq!(*status_code, Some(400));
                assert!(message.starts_with("INVALID_ARGUMENT: API key not valid"));
                assert!(!is_retryable);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_map_http_error_retryable_with_delay() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            "quota".to_string(),
            Some(Duration::from_secs(7)),
        );
        assert!(err.is_retryable());
        assert!(matches!(
            err,
            AgentError::ProcessError {
                retry_after: Some(d),
                ..
            } if d == Duration::from_secs(7)
        ));
    }

    #[test]
    fn test_forbidden_is_auth_error() {
        let err = map_http_error(StatusCode::FORBIDDEN, "denied".to_string(), None);
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(
            parse_retry_after(Some(&HeaderValue::from_static("12"))),
            Some(Duration::from_secs(12))
        );
        assert_eq!(
            parse_retry_after(Some(&HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"))),
            None
        );
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).as_deref(), Some("Hello world"));

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text_response(empty), None);
    }
}
