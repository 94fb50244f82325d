//! Gemini model configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Default per-request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    ///
    /// Also read from the bare `GEMINI_API_KEY` variable.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier (e.g., `gemini-2.5-flash-lite`).
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without the `/v1beta` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single `generateContent` request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Whether an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The API key, for callers that cannot run without the model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the key is empty.
    pub fn require(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(self.api_key.trim())
        } else {
            Err(ConfigError::NotConfigured {
                field: "gemini.api_key",
                hint: "set GEMINI_API_KEY or WICKET_GEMINI__API_KEY",
            })
        }
    }
}
