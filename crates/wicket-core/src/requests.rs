//! HTTP request bodies accepted by the Wicket service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ConversationMessage, DataTable, KeyStat, ProjectOutput, ValidationReport};

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub prompt: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Body of `POST /analyze-deep`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeepAnalysisRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_steps: Option<u32>,
}

/// Body of `POST /finalize`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinalizeRequest {
    pub project_title: String,
    pub conversation: Vec<ConversationMessage>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Body of `POST /validate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationRequest {
    pub article_markdown: String,
    #[serde(default)]
    pub data_tables: Vec<DataTable>,
    #[serde(default)]
    pub key_stats: Vec<KeyStat>,
}

/// Body of `POST /publish`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PublishRequest {
    pub project: ProjectOutput,
    pub validation: ValidationReport,
    #[serde(default)]
    pub output_folder: Option<String>,
}
