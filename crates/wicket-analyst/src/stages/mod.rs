//! Pipeline stages: prompt, gateway call, normalize, parse, fall back.
//!
//! A stage never fails on malformed model output. It returns
//! [`StageOutcome::Fallback`] with a deterministic default instead. Gateway
//! errors still propagate.

mod charts;
mod claims;
mod decompose;
mod sql;
mod synthesis;

pub use claims::{DatabaseCheck, ExtractedClaim, RecallCheck};
pub use synthesis::{ArticleDraft, ProjectDraft};

use serde::de::DeserializeOwned;
use serde_json::Value;
use wicket_llm::strip_markdown_fence;

/// Result of parsing a stage's model output.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The model's answer parsed.
    Parsed(T),
    /// The answer did not parse; this is the stage's default.
    Fallback(T),
}

impl<T> StageOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Parsed(value) | Self::Fallback(value) => value,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Parse fenced or bare JSON into `T`, logging the failure.
pub(crate) fn parse_json<T: DeserializeOwned>(stage: &'static str, raw: &str) -> Option<T> {
    let cleaned = strip_markdown_fence(raw);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(stage, %error, "model output did not parse, using fallback");
            None
        }
    }
}

/// Parse a JSON array, keeping the items that deserialize as `T`.
///
/// Returns `None` when the text is not a JSON array at all.
pub(crate) fn parse_json_items<T: DeserializeOwned>(stage: &'static str, raw: &str) -> Option<Vec<T>> {
    let items: Vec<Value> = parse_json(stage, raw)?;
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        tracing::warn!(stage, skipped = total - parsed.len(), "dropped unparseable items");
    }
    Some(parsed)
}
