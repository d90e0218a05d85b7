//! Gemini `generateContent` REST backend (server-only).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::analysis::{AnalysisError, ModelBackend};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime environment first, then whatever `build.rs` baked in from `.env`.
fn env_or_baked(key: &str, baked: Option<&'static str>) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn gemini_api_key() -> Option<String> {
    env_or_baked("GEMINI_API_KEY", option_env!("GEMINI_API_KEY"))
}
fn gemini_model() -> String {
    env_or_baked("LOG_ANALYZER_MODEL", option_env!("LOG_ANALYZER_MODEL"))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
fn gemini_base_url() -> String {
    env_or_baked("GEMINI_BASE_URL", option_env!("GEMINI_BASE_URL"))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, AnalysisError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(AnalysisError::Blocked(reason));
        };
        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "empty candidate".to_string());
            return Err(AnalysisError::Blocked(reason));
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            // No timeout: a call that never resolves keeps the UI busy.
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Read credentials and model settings from the environment at call time.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = gemini_api_key().ok_or(AnalysisError::MissingCredential)?;
        Ok(Self::new(api_key, gemini_model(), gemini_base_url()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn request_body(prompt: &str, response_schema: &Value) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        },
    })
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, response_schema: &Value) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt, response_schema))
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Remote { status, body });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Request(format!("unreadable response body: {}", e)))?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let backend = GeminiBackend::new("k", "gemini-2.5-flash", "https://example.test/v1beta/");
        assert_eq!(
            backend.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn body_requests_json_with_schema() {
        let schema = crate::analysis::response_schema();
        let body = request_body("hello", &schema);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn response_text_concatenates_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\""},{"text":":1}]"}]},"finishReason":"STOP"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_text().unwrap(), r#"[{"a":1}]"#);
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        match parsed.into_text() {
            Err(AnalysisError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let raw = r#"{"candidates":[{"content":{"parts":[]},"finishReason":"MAX_TOKENS"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(parsed.into_text(), Err(AnalysisError::Blocked(r)) if r == "MAX_TOKENS"));
    }
}
