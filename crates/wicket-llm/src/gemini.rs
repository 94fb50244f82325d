//! Gemini `generateContent` REST client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wicket_config::GeminiConfig;

use crate::client::ModelClient;
use crate::error::ModelError;
use crate::http::check_response;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String, ModelError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ModelError::EmptyResponse(format!("prompt blocked ({reason})")));
        }
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::EmptyResponse("no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "empty candidate".to_string());
            return Err(ModelError::EmptyResponse(reason));
        }
        Ok(text)
    }
}

/// HTTP client for one Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the `gemini` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wicket/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

impl ModelClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;
        data.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<String, ModelError> {
        serde_json::from_value::<GenerateResponse>(value)
            .unwrap()
            .into_text()
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let text = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": "SELECT "}, {"text": "1"}], "role": "model"}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(text, "SELECT 1");
    }

    #[test]
    fn blocked_prompt_is_empty_response() {
        let err = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap_err();
        assert!(matches!(err, ModelError::EmptyResponse(ref r) if r.contains("SAFETY")));
    }

    #[test]
    fn candidate_without_text_reports_finish_reason() {
        let err = parse(json!({"candidates": [{"finishReason": "MAX_TOKENS"}]})).unwrap_err();
        assert!(matches!(err, ModelError::EmptyResponse(ref r) if r == "MAX_TOKENS"));
    }

    #[test]
    fn endpoint_includes_model() {
        let config = GeminiConfig {
            api_key: "k".into(),
            base_url: "http://localhost:9999/".into(),
            ..Default::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint,
            "http://localhost:9999/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }
}
