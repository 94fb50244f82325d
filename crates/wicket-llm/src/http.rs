//! Status handling for `generateContent` responses.
//!
//! Gemini reports failures as
//! `{"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}`.
//! The message is lifted out of that envelope so errors read as the API
//! wrote them; other bodies are kept verbatim.

use serde::Deserialize;

use crate::error::ModelError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Pass successful responses through; turn everything else into a
/// [`ModelError`]. 429 becomes [`ModelError::RateLimited`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ModelError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after_secs = retry_after(&resp);
    let message = api_message(&resp.text().await.unwrap_or_default());
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ModelError::RateLimited {
            message,
            retry_after_secs,
        });
    }
    Err(ModelError::Api {
        status: status.as_u16(),
        message,
    })
}

fn retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// `"<STATUS>: <message>"` from a Gemini error body, or the body itself.
fn api_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) if error.status.is_empty() => error.message,
        Ok(ErrorEnvelope { error }) => format!("{}: {}", error.status, error.message),
        Err(_) => body.trim().to_string(),
    }
}
