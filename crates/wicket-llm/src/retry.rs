//! Retry policy for rate-limited model calls.
//!
//! Only rate-limit failures are retried; every other model error surfaces on
//! first occurrence.

use std::time::Duration;

use wicket_config::LimitsConfig;

use crate::error::ModelError;

/// Substrings (lowercase) that mark an error as a rate-limit response.
const RATE_LIMIT_MARKERS: [&str; 6] = [
    "429",
    "quota",
    "rate limit",
    "rate_limit",
    "resource exhausted",
    "resource_exhausted",
];

/// Configuration for retry behavior on rate-limited calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn from_limits(limits: &LimitsConfig) -> Self {
        Self {
            max_attempts: limits.max_retries,
            base_delay: Duration::from_secs(limits.retry_base_delay_secs),
        }
    }

    /// Backoff after the zero-based `attempt` failed: `base_delay * 2^attempt`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }
}

/// Whether a model error means "slow down" rather than "this request is bad".
#[must_use]
pub fn is_rate_limit(error: &ModelError) -> bool {
    if matches!(
        error,
        ModelError::RateLimited { .. } | ModelError::Api { status: 429, .. }
    ) {
        return true;
    }
    let message = error.to_string().to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|m| message.contains(m))
}
