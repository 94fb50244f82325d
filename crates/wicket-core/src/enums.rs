//! Chart kinds, verification methods, validation outcomes, and message roles.
//!
//! Wire spellings follow the HTTP contract consumed by the web client, so the
//! serde renames differ per enum (kebab-case chart kinds, `SCREAMING_SNAKE_CASE`
//! validation outcomes).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// Visualization type recommended for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    #[serde(alias = "horizontal_bar", alias = "horizontalbar")]
    HorizontalBar,
    Line,
    Area,
    Pie,
    Scatter,
    Radar,
    Composed,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::HorizontalBar => "horizontal-bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Radar => "radar",
            Self::Composed => "composed",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VerificationMethod
// ---------------------------------------------------------------------------

/// How a claim extracted from an article is checked.
///
/// `Web` is answered from the model's own recall; no search API is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum VerificationMethod {
    #[serde(rename = "database_query", alias = "database")]
    Database,
    #[serde(rename = "web_search", alias = "web")]
    Web,
    #[serde(rename = "both")]
    Both,
}

impl VerificationMethod {
    /// Parse the free-form method string a model produces.
    ///
    /// Unknown or missing methods fall back to [`Self::Database`].
    #[must_use]
    pub fn from_model_text(text: Option<&str>) -> Self {
        match text.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("web_search" | "web" | "web search" | "recall") => Self::Web,
            Some("both") => Self::Both,
            _ => Self::Database,
        }
    }

    /// Whether this method runs an independent database query.
    #[must_use]
    pub const fn uses_database(self) -> bool {
        matches!(self, Self::Database | Self::Both)
    }

    /// Whether this method asks the model to recall the fact.
    #[must_use]
    pub const fn uses_recall(self) -> bool {
        matches!(self, Self::Web | Self::Both)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database_query",
            Self::Web => "web_search",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OverallStatus / Recommendation
// ---------------------------------------------------------------------------

/// Aggregate verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Verified,
    Partial,
    Failed,
}

impl OverallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Partial => "PARTIAL",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publishing advice attached to a validation report.
///
/// Anything a client sends that is not one of the known values deserializes
/// as [`Self::Unrecognized`], which the publish gate rejects like any other
/// non-ready value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    ReadyToPublish,
    NeedsRevision,
    MajorIssues,
    #[serde(other)]
    Unrecognized,
}

impl Recommendation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadyToPublish => "READY_TO_PUBLISH",
            Self::NeedsRevision => "NEEDS_REVISION",
            Self::MajorIssues => "MAJOR_ISSUES",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a verification score (0–100) to its status and recommendation.
///
/// ```text
/// score >= 95 → VERIFIED / READY_TO_PUBLISH
/// score >= 80 → PARTIAL  / NEEDS_REVISION
/// otherwise   → FAILED   / MAJOR_ISSUES
/// ```
#[must_use]
pub fn grade(score: f64) -> (OverallStatus, Recommendation) {
    if score >= 95.0 {
        (OverallStatus::Verified, Recommendation::ReadyToPublish)
    } else if score >= 80.0 {
        (OverallStatus::Partial, Recommendation::NeedsRevision)
    } else {
        (OverallStatus::Failed, Recommendation::MajorIssues)
    }
}

// ---------------------------------------------------------------------------
// QuotaStatus
// ---------------------------------------------------------------------------

/// Whether the daily model-call ceiling still has room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotaStatus {
    Ok,
    LimitReached,
}

// ---------------------------------------------------------------------------
// MessageRole
// ---------------------------------------------------------------------------

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

impl MessageRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
