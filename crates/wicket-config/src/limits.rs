//! Model-call budget: daily quota, call spacing, retries, deep-analysis depth.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_daily_limit() -> u32 {
    950
}

const fn default_min_call_interval_ms() -> u64 {
    5_000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_base_delay_secs() -> u64 {
    60
}

const fn default_max_deep_steps() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Model calls admitted per local calendar day.
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,

    /// Minimum spacing between the starts of two model calls, in milliseconds.
    #[serde(default = "default_min_call_interval_ms")]
    pub min_call_interval_ms: u64,

    /// Total attempts per model call, the first included.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff after the first rate-limited attempt; doubles each time.
    #[serde(default = "default_retry_base_delay_secs")]
    pub retry_base_delay_secs: u64,

    /// Upper bound for `max_steps` on a deep analysis.
    #[serde(default = "default_max_deep_steps")]
    pub max_deep_steps: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            min_call_interval_ms: default_min_call_interval_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_secs: default_retry_base_delay_secs(),
            max_deep_steps: default_max_deep_steps(),
        }
    }
}

impl LimitsConfig {
    #[must_use]
    pub const fn min_call_interval(&self) -> Duration {
        Duration::from_millis(self.min_call_interval_ms)
    }

    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        Duration::from_secs(self.retry_base_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_free_tier_budget() {
        let config = LimitsConfig::default();
        assert_eq!(config.daily_limit, 950);
        assert_eq!(config.min_call_interval(), Duration::from_secs(5));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay(), Duration::from_secs(60));
        assert_eq!(config.max_deep_steps, 6);
    }
}
