use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::config::AppConfig;

/// Text-completion service abstraction (allows mocking).
pub trait CompletionClient {
    /// Send one prompt and return the raw completion text.
    fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// HTTP client for the Google Generative Language API.
#[derive(Debug)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    http: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, PipelineError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PipelineError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            http,
            timeout_secs,
        })
    }

    /// Build a client from configuration.
    ///
    /// Fails with `ServiceUnavailable` when no API key is configured —
    /// callers construct clients once at startup, so a missing credential
    /// surfaces before any request is accepted.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            PipelineError::ServiceUnavailable("GOOGLE_API_KEY is not set".into())
        })?;
        Self::new(api_key, &config.model, &config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for POST /v1beta/models/{model}:generateContent
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body from generateContent
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl CompletionClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    PipelineError::Completion(format!(
                        "cannot reach completion service at {}",
                        self.base_url,
                    ))
                } else if e.is_timeout() {
                    PipelineError::Completion(format!(
                        "request timed out after {}s",
                        self.timeout_secs,
                    ))
                } else {
                    PipelineError::Completion(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PipelineError::Completion(format!(
                "completion service returned status {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| PipelineError::Completion(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                PipelineError::Completion("completion response contained no candidates".into())
            })
    }
}

/// Mock completion client for testing — returns a configurable response.
pub struct MockCompletionClient {
    response: String,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn generate(&self, _prompt: &str) -> Result<String, PipelineError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockCompletionClient::new("test response");
        assert_eq!(client.generate("prompt").unwrap(), "test response");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GeminiClient::new("key", "gemini-2.5-flash-lite", "https://example.test/", 60)
            .unwrap();
        assert_eq!(client.base_url(), "https://example.test");
        assert_eq!(client.model(), "gemini-2.5-flash-lite");
    }

    #[test]
    fn from_config_without_key_is_service_unavailable() {
        let config = AppConfig::default();
        let err = GeminiClient::from_config(&config).unwrap_err();
        assert!(matches!(err, PipelineError::ServiceUnavailable(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn from_config_with_key_builds_client() {
        let config = AppConfig {
            api_key: Some("test-key".into()),
            ..AppConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn request_body_serializes_to_expected_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn response_body_deserializes_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "the completion"}], "role": "model"}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "the completion");
    }

    #[test]
    fn empty_response_body_deserializes_to_no_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
