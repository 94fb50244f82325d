//! # wicket-llm
//!
//! Outbound language-model access for Wicket.
//!
//! - [`Gateway`]: the one path to the model. Checks the daily quota, spaces
//!   calls with a throttle, and retries rate-limited attempts with
//!   exponential backoff.
//! - [`GeminiClient`]: REST client for Gemini `generateContent`.
//! - [`strip_markdown_fence`]: removes code fences models wrap around JSON
//!   and SQL.

mod client;
mod error;
mod gateway;
mod gemini;
mod http;
mod normalize;
mod quota;
mod retry;
mod throttle;

pub use client::{ModelClient, ScriptedClient};
pub use error::{GatewayError, ModelError};
pub use gateway::Gateway;
pub use gemini::GeminiClient;
pub use normalize::strip_markdown_fence;
pub use quota::{Calendar, LocalCalendar, ManualCalendar, QuotaSnapshot, QuotaTracker};
pub use retry::{RetryPolicy, is_rate_limit};
pub use throttle::Throttle;
