//! The single entry point for outbound model calls.

use std::sync::Arc;

use wicket_config::{GeminiConfig, LimitsConfig};

use crate::client::ModelClient;
use crate::error::{GatewayError, ModelError};
use crate::gemini::GeminiClient;
use crate::quota::{Calendar, LocalCalendar, QuotaSnapshot, QuotaTracker};
use crate::retry::{RetryPolicy, is_rate_limit};
use crate::throttle::Throttle;

/// Quota-checked, throttled, retrying access to a model.
///
/// Every attempt (retries included) takes one quota slot and one throttle
/// slot. Shared by all requests; wrap in an `Arc`.
#[derive(Debug)]
pub struct Gateway<C> {
    client: Option<C>,
    model: String,
    quota: QuotaTracker,
    throttle: Throttle,
    retry: RetryPolicy,
}

impl Gateway<GeminiClient> {
    /// Build the production gateway.
    ///
    /// A missing API key yields a gateway whose calls fail with
    /// [`GatewayError::NotConfigured`], so the service can still start.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the HTTP client fails to build.
    pub fn from_config(gemini: &GeminiConfig, limits: &LimitsConfig) -> Result<Self, ModelError> {
        let client = if gemini.is_configured() {
            Some(GeminiClient::new(gemini)?)
        } else {
            tracing::warn!("no Gemini API key configured; model-backed endpoints will fail");
            None
        };
        Ok(Self::with_calendar(
            client,
            gemini.model.clone(),
            limits,
            Arc::new(LocalCalendar),
        ))
    }
}

impl<C: ModelClient> Gateway<C> {
    #[must_use]
    pub fn new(client: Option<C>, model: impl Into<String>, limits: &LimitsConfig) -> Self {
        Self::with_calendar(client, model, limits, Arc::new(LocalCalendar))
    }

    #[must_use]
    pub fn with_calendar(
        client: Option<C>,
        model: impl Into<String>,
        limits: &LimitsConfig,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            quota: QuotaTracker::new(limits.daily_limit, calendar),
            throttle: Throttle::new(limits.min_call_interval()),
            retry: RetryPolicy::from_limits(limits),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    #[must_use]
    pub const fn client(&self) -> Option<&C> {
        self.client.as_ref()
    }

    /// Today's quota usage. Does not consume a slot.
    pub fn quota(&self) -> QuotaSnapshot {
        self.quota.snapshot()
    }

    /// Send `prompt` with the configured retry policy; returns trimmed text.
    ///
    /// # Errors
    ///
    /// See [`Self::invoke_with`].
    pub async fn invoke(&self, prompt: &str) -> Result<String, GatewayError> {
        self.invoke_with(prompt, self.retry).await
    }

    /// Send `prompt` with an explicit retry policy.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotConfigured`] when no client is configured.
    /// - [`GatewayError::QuotaExceeded`] as soon as the daily ceiling denies an
    ///   attempt. Never retried.
    /// - [`GatewayError::RateLimited`] when every attempt was rate limited.
    /// - [`GatewayError::Model`] for any other model failure, on first
    ///   occurrence.
    pub async fn invoke_with(&self, prompt: &str, policy: RetryPolicy) -> Result<String, GatewayError> {
        let client = self.client.as_ref().ok_or(GatewayError::NotConfigured)?;
        let attempts = policy.max_attempts.max(1);

        for attempt in 0..attempts {
            if !self.quota.admit() {
                let daily_limit = self.quota.daily_limit();
                tracing::warn!(daily_limit, "daily model quota exhausted");
                return Err(GatewayError::QuotaExceeded { daily_limit });
            }
            self.throttle.wait_for_slot().await;

            tracing::debug!(
                attempt = attempt + 1,
                of = attempts,
                model = %self.model,
                prompt_chars = prompt.len(),
                "calling model"
            );
            match client.complete(prompt).await {
                Ok(text) => return Ok(text.trim().to_string()),
                Err(error) if is_rate_limit(&error) => {
                    if attempt + 1 < attempts {
                        let delay = policy.delay_after(attempt);
                        tracing::warn!(
                            attempt = attempt + 1,
                            delay_secs = delay.as_secs(),
                            %error,
                            "model rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        tracing::warn!(attempts, %error, "model rate limited, giving up");
                    }
                }
                Err(error) => return Err(GatewayError::Model(error)),
            }
        }

        Err(GatewayError::RateLimited { attempts })
    }
}
