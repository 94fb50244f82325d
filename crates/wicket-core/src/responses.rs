//! HTTP response bodies returned by the Wicket service.
//!
//! `ProjectOutput` and `ValidationReport` double as the responses of
//! `/finalize` and `/validate` and live in [`crate::entities`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Row;
use crate::entities::{ChartRecommendation, PipelineStep};
use crate::enums::QuotaStatus;

/// Response from `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Response from `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisResponse {
    pub markdown: String,
    pub sql_used: String,
    pub data: Vec<Row>,
}

/// Response from `POST /analyze-deep`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DeepAnalysisResponse {
    pub title: String,
    pub executive_summary: String,
    pub steps: Vec<PipelineStep>,
    pub article: String,
    pub tweet: String,
    pub charts: Vec<ChartRecommendation>,
    pub methodology: String,
    pub limitations: String,
    pub total_records_analyzed: usize,
}

/// Response from `POST /publish`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublishResponse {
    pub success: bool,
    pub slug: String,
    pub files_created: Vec<String>,
    pub project_path: String,
    pub message: String,
}

/// Response from `GET /rate-limit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RateLimitResponse {
    pub date: String,
    pub used: u32,
    pub remaining: u32,
    pub daily_limit: u32,
    pub status: QuotaStatus,
    pub model: String,
    pub message: String,
}

/// Response from the `*/status` readiness endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StageStatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_configured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
    pub description: String,
}
