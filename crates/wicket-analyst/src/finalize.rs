use chrono::Local;
use serde_json::{Number, Value};
use wicket_core::entities::{DataSet, DataTable, KeyStat, ProjectOutput};
use wicket_core::requests::FinalizeRequest;
use wicket_core::slug::slugify;
use wicket_llm::ModelClient;

use crate::Analyst;
use crate::error::AnalystError;

/// Key stats derived from data when the model supplies none.
const MAX_DERIVED_KEY_STATS: usize = 4;

impl<C: ModelClient> Analyst<C> {
    /// Turn an exploratory conversation into a publication-ready project.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when a model call fails.
    pub async fn finalize(&self, request: &FinalizeRequest) -> Result<ProjectOutput, AnalystError> {
        let data_sets = DataSet::extract_all(&request.conversation);
        tracing::debug!(data_sets = data_sets.len(), "finalizing conversation");

        let draft = self
            .synthesize_conversation(&request.project_title, &request.conversation, &data_sets)
            .await?
            .into_inner();
        let charts = self
            .recommend_charts_for_data_sets(&data_sets)
            .await?
            .into_inner();

        let key_stats = if draft.key_stats.is_empty() {
            derive_key_stats(&data_sets)
        } else {
            draft.key_stats
        };
        let author = request
            .author
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_author.clone());

        Ok(ProjectOutput {
            slug: slugify(&request.project_title),
            title: request.project_title.clone(),
            author,
            date: Local::now().format("%Y-%m-%d").to_string(),
            executive_summary: draft.executive_summary,
            article_markdown: draft.article,
            tweet: draft.tweet,
            key_stats,
            charts,
            data_tables: data_tables(&data_sets),
            methodology: draft.methodology,
            limitations: draft.limitations,
            verification_notes: draft.verification_notes,
        })
    }
}

fn data_tables(data_sets: &[DataSet]) -> Vec<DataTable> {
    data_sets
        .iter()
        .enumerate()
        .map(|(index, set)| {
            let title = if set.query_context.is_empty() {
                format!("Dataset {}", index + 1)
            } else {
                set.query_context.chars().take(100).collect()
            };
            DataTable {
                table_id: format!("table_{index}"),
                title,
                data: set.data.clone(),
                row_count: set.row_count,
            }
        })
        .collect()
}

/// First numeric column of the first row of each leading data set.
fn derive_key_stats(data_sets: &[DataSet]) -> Vec<KeyStat> {
    data_sets
        .iter()
        .take(MAX_DERIVED_KEY_STATS)
        .filter_map(|set| {
            let (column, value) = set.data.first()?.iter().find(|(_, v)| v.is_number())?;
            Some(KeyStat {
                label: title_case(&column.replace('_', " ")),
                value: stat_value(value),
                context: format!("From {} records", set.row_count),
            })
        })
        .collect()
}

/// Floats keep two decimals; integers print as they are.
fn stat_value(value: &Value) -> String {
    match value.as_f64() {
        Some(f) if value.is_f64() => Number::from_f64((f * 100.0).round() / 100.0)
            .map_or_else(|| f.to_string(), |n| n.to_string()),
        _ => value.to_string(),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
