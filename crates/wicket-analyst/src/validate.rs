use wicket_core::entities::{ClaimVerification, ValidationReport};
use wicket_core::enums::VerificationMethod;
use wicket_core::requests::ValidationRequest;
use wicket_llm::ModelClient;

use crate::Analyst;
use crate::error::AnalystError;
use crate::stages::{DatabaseCheck, ExtractedClaim, RecallCheck};

/// A database check passes when the values differ by at most this percentage.
const TOLERANCE_PERCENT: f64 = 5.0;

impl<C: ModelClient> Analyst<C> {
    /// Fact-check an article and score it for publishing.
    ///
    /// Claims are checked one after another. Database checks count toward
    /// `database_queries_run`, recall checks toward `web_searches_performed`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when a model call fails. Failing
    /// verification queries are recorded on their claim instead.
    pub async fn validate(&self, request: &ValidationRequest) -> Result<ValidationReport, AnalystError> {
        let extracted = self
            .extract_claims(&request.article_markdown, &request.key_stats)
            .await?
            .into_inner();
        if extracted.is_empty() {
            return Ok(ValidationReport::no_claims());
        }

        let mut claims = Vec::with_capacity(extracted.len());
        let mut database_queries_run = 0;
        let mut web_searches_performed = 0;

        for (index, claim) in extracted.iter().enumerate() {
            let method = VerificationMethod::from_model_text(claim.verification_method.as_deref());
            let mut verification = pending(claim, index, method);

            if method.uses_database() {
                database_queries_run += 1;
                let check = self.verify_with_database(claim).await?;
                apply_database_check(&mut verification, check);
            }
            if method.uses_recall() {
                web_searches_performed += 1;
                let check = self.verify_with_recall(claim).await?.into_inner();
                apply_recall_check(&mut verification, check, method);
            }

            tracing::debug!(
                claim_id = verification.claim_id,
                %method,
                verified = verification.verified,
                "claim checked"
            );
            claims.push(verification);
        }

        Ok(ValidationReport::from_claims(
            claims,
            database_queries_run,
            web_searches_performed,
        ))
    }
}

fn pending(claim: &ExtractedClaim, index: usize, method: VerificationMethod) -> ClaimVerification {
    let fallback_id = i64::try_from(index).map_or(i64::MAX, |i| i + 1);
    ClaimVerification::pending(
        claim.claim_id.unwrap_or(fallback_id),
        claim.claim_text.clone(),
        claim.claim_type.clone().unwrap_or_else(|| "unknown".to_string()),
        method,
        claim.expected_value.clone(),
    )
}

fn apply_database_check(verification: &mut ClaimVerification, check: DatabaseCheck) {
    verification.generated_query = Some(check.sql_query);
    verification.query_result = check.rows;

    if let Some(error) = check.error {
        verification.notes = format!("DB Error: {error}");
        return;
    }
    let Some(actual) = check.actual_value else {
        verification.notes = "Query returned no value".to_string();
        return;
    };

    let discrepancy = verification
        .expected_value
        .as_deref()
        .and_then(|expected| discrepancy_percent(expected, &actual));
    verification.actual_value = Some(actual);
    verification.discrepancy_percent = discrepancy;
    verification.notes = match discrepancy {
        Some(d) if d <= TOLERANCE_PERCENT => {
            verification.verified = true;
            format!("Verified within 5% tolerance (discrepancy: {d:.1}%)")
        }
        Some(d) => format!("DISCREPANCY: {d:.1}% difference from claimed value"),
        None => "Could not calculate discrepancy".to_string(),
    };
}

/// Recall fills the search fields; it decides the verdict only for recall-only claims.
fn apply_recall_check(
    verification: &mut ClaimVerification,
    check: RecallCheck,
    method: VerificationMethod,
) {
    verification.recall_query = Some(check.search_query);
    verification.recall_result = Some(check.explanation.clone());

    if method == VerificationMethod::Web {
        verification.actual_value = check.actual_value;
        verification.verified = check.accurate;
        verification.notes = if check.source_hint.is_empty() {
            check.explanation
        } else {
            format!("{} (Source: {})", check.explanation, check.source_hint)
        };
    }
}

/// Percentage difference between a claimed and a computed value.
///
/// Both strings are reduced to their digits and dots (`"32.9%"` → `32.9`).
/// A claimed 0 gives 0 when the computed value is also 0 and 100 otherwise.
/// Returns `None` when either side does not parse.
#[must_use]
pub fn discrepancy_percent(expected: &str, actual: &str) -> Option<f64> {
    let expected = numeric_part(expected)?;
    let actual = numeric_part(actual)?;
    if expected == 0.0 {
        return Some(if actual == 0.0 { 0.0 } else { 100.0 });
    }
    Some((expected - actual).abs() / expected * 100.0)
}

fn numeric_part(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    kept.parse().ok()
}
