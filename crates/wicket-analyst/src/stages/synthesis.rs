use serde::Deserialize;
use wicket_core::entities::{ConversationMessage, DataSet, KeyStat, PipelineStep};
use wicket_core::lenient;
use wicket_llm::ModelClient;

use super::{StageOutcome, parse_json};
use crate::Analyst;
use crate::error::AnalystError;
use crate::prompts;

fn default_title() -> String {
    "Cricket Analysis".to_string()
}

/// Narrative produced for a deep analysis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleDraft {
    #[serde(default = "default_title", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub executive_summary: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub article: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tweet: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub methodology: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub limitations: String,
}

impl ArticleDraft {
    fn fallback(question: &str, steps: &[PipelineStep]) -> Self {
        let findings: Vec<String> = steps
            .iter()
            .map(|s| {
                format!(
                    "### {}\n{}",
                    s.title,
                    s.insight_text.as_deref().unwrap_or("Data collected.")
                )
            })
            .collect();
        Self {
            title: default_title(),
            executive_summary: "Analysis completed. See detailed findings below.".to_string(),
            article: format!(
                "# Analysis\n\nBased on the request: {question}\n\n## Findings\n\n{}",
                findings.join("\n\n")
            ),
            tweet: "New cricket analysis reveals interesting patterns in the data. [link]"
                .to_string(),
            methodology: "SQL queries executed against ball-by-ball cricket data.".to_string(),
            limitations: "Analysis limited to available data fields.".to_string(),
        }
    }
}

/// Narrative produced when finalizing a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectDraft {
    #[serde(default, deserialize_with = "lenient::text")]
    pub executive_summary: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub article: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tweet: String,
    #[serde(default, deserialize_with = "key_stats")]
    pub key_stats: Vec<KeyStat>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub methodology: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub limitations: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub verification_notes: String,
}

/// Keep the key stats that parse; a malformed entry does not sink the draft.
fn key_stats<'de, D>(deserializer: D) -> Result<Vec<KeyStat>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

impl ProjectDraft {
    fn fallback(title: &str, total_records: usize) -> Self {
        Self {
            executive_summary: "Analysis complete. See article for detailed findings.".to_string(),
            article: format!("# {title}\n\nAnalysis based on {total_records} records."),
            tweet: "New cricket analysis with data-backed insights. [link]".to_string(),
            key_stats: Vec::new(),
            methodology: "SQL analysis against ball-by-ball cricket data.".to_string(),
            limitations: "Limited to available data fields.".to_string(),
            verification_notes: "All statistics derived from database queries.".to_string(),
        }
    }
}

impl<C: ModelClient> Analyst<C> {
    /// Write the deep-analysis article from the executed steps.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn synthesize_article(
        &self,
        question: &str,
        steps: &[PipelineStep],
    ) -> Result<StageOutcome<ArticleDraft>, AnalystError> {
        let prompt = prompts::synthesize_article(question, steps);
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(match parse_json("synthesize_article", &raw) {
            Some(draft) => StageOutcome::Parsed(draft),
            None => StageOutcome::Fallback(ArticleDraft::fallback(question, steps)),
        })
    }

    /// Write the project article from a conversation and its data sets.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn synthesize_conversation(
        &self,
        title: &str,
        conversation: &[ConversationMessage],
        data_sets: &[DataSet],
    ) -> Result<StageOutcome<ProjectDraft>, AnalystError> {
        let prompt = prompts::synthesize_conversation(title, conversation, data_sets);
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(match parse_json("synthesize_conversation", &raw) {
            Some(draft) => StageOutcome::Parsed(draft),
            None => {
                let total = data_sets.iter().map(|s| s.row_count).sum();
                StageOutcome::Fallback(ProjectDraft::fallback(title, total))
            }
        })
    }
}
