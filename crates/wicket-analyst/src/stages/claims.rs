use serde::Deserialize;
use wicket_core::Row;
use wicket_core::entities::KeyStat;
use wicket_core::lenient;
use wicket_llm::{ModelClient, strip_markdown_fence};

use super::{StageOutcome, parse_json, parse_json_items};
use crate::Analyst;
use crate::error::AnalystError;
use crate::prompts;

/// Rows kept on a verification for display.
const RESULT_PREVIEW_ROWS: usize = 5;

/// A checkable claim as the model lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractedClaim {
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub claim_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub claim_text: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub claim_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub expected_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub verification_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub sql_hint: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub search_hint: Option<String>,
}

/// Outcome of recomputing a claim with SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseCheck {
    pub sql_query: String,
    /// First rows of the result, when the query ran.
    pub rows: Option<Vec<Row>>,
    /// First non-null value of the first row.
    pub actual_value: Option<String>,
    pub error: Option<String>,
}

/// The model's recollection of a claim. No search is performed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecallCheck {
    #[serde(default, deserialize_with = "lenient::text")]
    pub search_query: String,
    #[serde(rename = "is_accurate", default, deserialize_with = "lenient::flag")]
    pub accurate: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub actual_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub source_hint: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub explanation: String,
}

impl RecallCheck {
    fn unparsed(claim: &ExtractedClaim) -> Self {
        Self {
            search_query: claim.search_hint.clone().unwrap_or_default(),
            accurate: false,
            actual_value: None,
            source_hint: String::new(),
            explanation: "Unable to parse verification result".to_string(),
        }
    }
}

impl<C: ModelClient> Analyst<C> {
    /// List the checkable claims in an article.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn extract_claims(
        &self,
        article: &str,
        key_stats: &[KeyStat],
    ) -> Result<StageOutcome<Vec<ExtractedClaim>>, AnalystError> {
        let prompt = prompts::extract_claims(article, key_stats);
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(match parse_json_items("extract_claims", &raw) {
            Some(claims) => StageOutcome::Parsed(claims),
            None => StageOutcome::Fallback(Vec::new()),
        })
    }

    /// Have the model write SQL for a claim and run it.
    ///
    /// A failing query is reported in [`DatabaseCheck::error`], not as an
    /// error of this call.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn verify_with_database(
        &self,
        claim: &ExtractedClaim,
    ) -> Result<DatabaseCheck, AnalystError> {
        let prompt = prompts::verify_with_database(self.lake.schema_description(), claim);
        let raw = self.gateway.invoke(&prompt).await?;
        let sql_query = strip_markdown_fence(&raw);

        match self.lake.query(&sql_query).await {
            Ok(rows) => {
                let actual_value = rows
                    .first()
                    .and_then(|row| row.values().find_map(lenient::value_to_text));
                Ok(DatabaseCheck {
                    sql_query,
                    rows: Some(rows.into_iter().take(RESULT_PREVIEW_ROWS).collect()),
                    actual_value,
                    error: None,
                })
            }
            Err(error) => {
                tracing::debug!(%error, "verification query failed");
                Ok(DatabaseCheck {
                    sql_query,
                    rows: None,
                    actual_value: None,
                    error: Some(error.to_string()),
                })
            }
        }
    }

    /// Ask the model whether a claim matches what it knows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn verify_with_recall(
        &self,
        claim: &ExtractedClaim,
    ) -> Result<StageOutcome<RecallCheck>, AnalystError> {
        let prompt = prompts::verify_with_recall(claim);
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(match parse_json("verify_with_recall", &raw) {
            Some(check) => StageOutcome::Parsed(check),
            None => StageOutcome::Fallback(RecallCheck::unparsed(claim)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn claim_fields_are_lenient() {
        let claim: ExtractedClaim = serde_json::from_str(
            r#"{"claim_id": "4", "claim_text": "Gayle hit 357 sixes", "expected_value": 357}"#,
        )
        .unwrap();
        assert_eq!(claim.claim_id, Some(4));
        assert_eq!(claim.expected_value.as_deref(), Some("357"));
        assert_eq!(claim.verification_method, None);
    }

    #[test]
    fn recall_defaults_to_not_accurate() {
        let check: RecallCheck =
            serde_json::from_str(r#"{"actual_value": 50, "explanation": "Dhoni made 50"}"#).unwrap();
        assert!(!check.accurate);
        assert_eq!(check.actual_value.as_deref(), Some("50"));
        assert_eq!(check.source_hint, "");
    }

    #[test]
    fn recall_accepts_quoted_verdict() {
        let check: RecallCheck = serde_json::from_str(
            r#"{"is_accurate": "true", "actual_value": "50", "explanation": "Correct"}"#,
        )
        .unwrap();
        assert!(check.accurate);
        assert_eq!(check.actual_value.as_deref(), Some("50"));
        assert_eq!(check.explanation, "Correct");
    }

    #[test]
    fn unparsed_recall_keeps_search_hint() {
        let claim = ExtractedClaim {
            search_hint: Some("Dhoni 2019 semi-final".into()),
            ..ExtractedClaim::default()
        };
        let check = RecallCheck::unparsed(&claim);
        assert_eq!(check.search_query, "Dhoni 2019 semi-final");
        assert_eq!(check.explanation, "Unable to parse verification result");
    }
}
