use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Row;

/// One analytical angle of a deep analysis.
///
/// Created at decomposition time with its generated SQL, then completed exactly
/// once by [`PipelineStep::with_rows`] or [`PipelineStep::with_error`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PipelineStep {
    pub step_number: u32,
    pub title: String,
    pub research_question: String,
    #[serde(rename = "sql_query")]
    pub generated_query: Option<String>,
    #[serde(rename = "results")]
    pub result_rows: Option<Vec<Row>>,
    #[serde(rename = "insight")]
    pub insight_text: Option<String>,
    #[serde(rename = "error")]
    pub error_text: Option<String>,
}

impl PipelineStep {
    /// A step as produced by decomposition, before execution.
    #[must_use]
    pub fn planned(
        step_number: u32,
        title: impl Into<String>,
        research_question: impl Into<String>,
        generated_query: Option<String>,
    ) -> Self {
        Self {
            step_number,
            title: title.into(),
            research_question: research_question.into(),
            generated_query,
            result_rows: None,
            insight_text: None,
            error_text: None,
        }
    }

    /// Record a successful execution.
    ///
    /// Non-empty results get an insight naming the row count and the first
    /// numeric column of the first row.
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        if !rows.is_empty() {
            let mut insight = format!("Found {} records. ", rows.len());
            if let Some((column, value)) = rows[0].iter().find(|(_, v)| v.is_number()) {
                insight.push_str(&format!("Key metric ({column}): {value}"));
            }
            self.insight_text = Some(insight);
        }
        self.result_rows = Some(rows);
        self
    }

    /// Record a failed execution; the insight carries the first 100 characters.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        let head: String = error.chars().take(100).collect();
        self.insight_text = Some(format!("Query failed: {head}"));
        self.error_text = Some(error);
        self
    }

    /// Mark a step for which the model produced no SQL.
    #[must_use]
    pub fn without_query(mut self) -> Self {
        self.error_text = Some("No SQL query generated for this step".to_string());
        self
    }

    /// Number of rows this step returned (0 when it did not run).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.result_rows.as_ref().map_or(0, Vec::len)
    }

    /// Whether the step produced at least one row.
    #[must_use]
    pub fn has_rows(&self) -> bool {
        self.row_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn insight_names_first_numeric_column() {
        let step = PipelineStep::planned(1, "Career", "How fast?", Some("SELECT 1".into()))
            .with_rows(vec![
                row(json!({"batter": "V Kohli", "runs": 8004, "strike_rate": 131.97})),
                row(json!({"batter": "S Dhawan", "runs": 6769, "strike_rate": 127.14})),
            ]);

        assert_eq!(
            step.insight_text.as_deref(),
            Some("Found 2 records. Key metric (runs): 8004")
        );
        assert_eq!(step.row_count(), 2);
        assert_eq!(step.error_text, None);
    }

    #[test]
    fn empty_results_have_no_insight() {
        let step = PipelineStep::planned(2, "Empty", "Nothing?", Some("SELECT 1".into()))
            .with_rows(Vec::new());
        assert_eq!(step.insight_text, None);
        assert_eq!(step.result_rows, Some(Vec::new()));
        assert!(!step.has_rows());
    }

    #[test]
    fn failure_truncates_insight_but_keeps_full_error() {
        let long = "x".repeat(150);
        let step = PipelineStep::planned(3, "Bad", "Broken?", Some("SELEC".into())).with_error(&long);
        assert_eq!(step.error_text.as_deref(), Some(long.as_str()));
        assert_eq!(
            step.insight_text.unwrap().len(),
            "Query failed: ".len() + 100
        );
    }

    #[test]
    fn wire_names_match_http_contract() {
        let step = PipelineStep::planned(1, "T", "Q", Some("SELECT 1".into())).without_query();
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["sql_query"], "SELECT 1");
        assert_eq!(value["error"], "No SQL query generated for this step");
        assert!(value.get("results").is_some());
        assert!(value.get("insight").is_some());
    }
}
