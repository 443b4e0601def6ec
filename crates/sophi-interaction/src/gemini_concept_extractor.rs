//! Concept extraction through Gemini's JSON response mode.

use crate::gemini_api_agent::{
    Content, GeminiApiAgent, GenerateContentRequest, GenerationConfig, SystemInstruction,
};
use async_trait::async_trait;
use serde_json::json;
use sophi_core::agent::{AgentError, ConceptExtractor};
use sophi_core::concept::ExtractedConcept;

/// Upper bound on concepts requested per extraction.
pub const MAX_CONCEPTS_PER_EXTRACTION: usize = 5;

const EXTRACTION_INSTRUCTION: &str = "You map philosophical dialogue onto a concept graph. \
Return only concepts that are explicitly discussed. Importance is an integer from 1 (passing mention) to 5 (central theme).";

/// Extracts concepts by asking Gemini for a schema-constrained JSON array.
#[derive(Clone)]
pub struct GeminiConceptExtractor {
    agent: GeminiApiAgent,
}

impl GeminiConceptExtractor {
    pub fn new(agent: GeminiApiAgent) -> Self {
        Self { agent }
    }

    fn build_request(&self, dialogue_text: &str, existing_labels: &[String]) -> GenerateContentRequest {
        let mut prompt = format!(
            "Extract up to {MAX_CONCEPTS_PER_EXTRACTION} key philosophical concepts from this dialogue. JSON format.\n\n{dialogue_text}"
        );
        if !existing_labels.is_empty() {
            prompt.push_str(&format!(
                "\n\nKnown concepts (reuse these labels when they apply): {}",
                existing_labels.join(", ")
            ));
        }

        GenerateContentRequest {
            contents: vec![Content::user(&prompt)],
            system_instruction: Some(SystemInstruction::text(EXTRACTION_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(concept_schema()),
                ..Default::default()
            }),
        }
    }
}

fn concept_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "label": { "type": "STRING" },
                "description": { "type": "STRING" },
                "category": { "type": "STRING" },
                "importance": { "type": "INTEGER" }
            },
            "required": ["label", "description"]
        }
    })
}

/// Decodes the model's JSON array; blank output means no concepts.
fn parse_concepts(text: &str) -> Result<Vec<ExtractedConcept>, AgentError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let mut concepts: Vec<ExtractedConcept> = serde_json::from_str(trimmed)
        .map_err(|e| AgentError::InvalidResponse(format!("Concept JSON did not match schema: {e}")))?;
    concepts.truncate(MAX_CONCEPTS_PER_EXTRACTION);
    Ok(concepts)
}

#[async_trait]
impl ConceptExtractor for GeminiConceptExtractor {
    async fn extract_concepts(
        &self,
        dialogue_text: &str,
        existing_labels: &[String],
    ) -> Result<Vec<ExtractedConcept>, AgentError> {
        let body = self.build_request(dialogue_text, existing_labels);
        let text = self.agent.send_request(&body).await?.unwrap_or_default();
        parse_concepts(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_json_mode_with_schema() {
        let extractor = GeminiConceptExtractor::new(GeminiApiAgent::new("key", "m"));
        let body = serde_json::to_value(
            extractor.build_request("user: is free will real?", &["Determinism".to_string()]),
        )
        .unwrap();

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "ARRAY");
        assert_eq!(
            config["responseSchema"]["items"]["required"],
            json!(["label", "description"])
        );

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("is free will real?"));
        assert!(prompt.contains("Determinism"));
    }

    #[test]
    fn test_parse_concepts() {
        let parsed = parse_concepts(
            r#"[{"label":"Free Will","description":"Agency","importance":4},
                {"label":"Determinism","description":"Causal closure","category":"Metaphysics"}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].importance, Some(4));
        assert_eq!(parsed[1].category.as_deref(), Some("Metaphysics"));
    }

    #[test]
    fn test_parse_concepts_blank_and_invalid() {
        assert!(parse_concepts("  ").unwrap().is_empty());
        assert!(matches!(
            parse_concepts("{\"label\":1}"),
            Err(AgentError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_concepts_caps_count() {
        let many: Vec<_> = (0..8)
            .map(|i| json!({"label": format!("C{i}"), "description": "d"}))
            .collect();
        let parsed = parse_concepts(&serde_json::to_string(&many).unwrap()).unwrap();
        assert_eq!(parsed.len(), MAX_CONCEPTS_PER_EXTRACTION);
    }
}
