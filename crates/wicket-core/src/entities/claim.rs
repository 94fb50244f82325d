use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Row;
use crate::enums::VerificationMethod;

/// Verification outcome for a single claim extracted from an article.
///
/// Filled in while the verification methods run; frozen once the validation
/// report is assembled.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClaimVerification {
    pub claim_id: i64,
    pub claim_text: String,
    #[serde(rename = "claim_type")]
    pub claim_kind: String,
    pub verification_method: VerificationMethod,
    #[serde(rename = "sql_query")]
    pub generated_query: Option<String>,
    #[serde(rename = "sql_result")]
    pub query_result: Option<Vec<Row>>,
    /// Query the model says it would search for. Recall only, never executed.
    #[serde(rename = "web_search_query")]
    pub recall_query: Option<String>,
    #[serde(rename = "web_search_result")]
    pub recall_result: Option<String>,
    pub expected_value: Option<String>,
    pub actual_value: Option<String>,
    #[serde(rename = "is_verified")]
    pub verified: bool,
    pub discrepancy_percent: Option<f64>,
    pub notes: String,
}

impl ClaimVerification {
    /// A claim that has not been checked yet.
    #[must_use]
    pub fn pending(
        claim_id: i64,
        claim_text: impl Into<String>,
        claim_kind: impl Into<String>,
        verification_method: VerificationMethod,
        expected_value: Option<String>,
    ) -> Self {
        Self {
            claim_id,
            claim_text: claim_text.into(),
            claim_kind: claim_kind.into(),
            verification_method,
            generated_query: None,
            query_result: None,
            recall_query: None,
            recall_result: None,
            expected_value,
            actual_value: None,
            verified: false,
            discrepancy_percent: None,
            notes: String::new(),
        }
    }
}
