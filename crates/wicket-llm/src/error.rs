//! Model client and gateway error types.

use thiserror::Error;

/// Errors from a single model request.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited (429): {message}")]
    RateLimited {
        /// Error message or response body.
        message: String,
        /// `Retry-After` in seconds, when the API sent one.
        retry_after_secs: Option<u64>,
    },

    /// The response body was not the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model returned no text (blocked prompt or empty candidate list).
    #[error("model returned no text: {0}")]
    EmptyResponse(String),
}

/// Errors surfaced by [`crate::Gateway::invoke`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key is configured.
    #[error("Gemini API key is not configured; set GEMINI_API_KEY or WICKET_GEMINI__API_KEY")]
    NotConfigured,

    /// The daily call ceiling has been reached.
    #[error("Daily API limit of {daily_limit} requests reached. Try again tomorrow.")]
    QuotaExceeded {
        /// The configured ceiling.
        daily_limit: u32,
    },

    /// Every attempt was rate limited.
    #[error("Rate limited after {attempts} attempts. Please wait a few minutes and try again.")]
    RateLimited {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// A non-rate-limit model failure.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
