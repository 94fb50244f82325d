use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Row;
use crate::entities::{ChartRecommendation, ClaimVerification};
use crate::enums::{self, OverallStatus, Recommendation};
use crate::lenient;

/// A headline number shown on a project card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct KeyStat {
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: String,
}

/// A result set bundled with a project, written out as CSV on publish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DataTable {
    #[serde(default)]
    pub table_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub row_count: usize,
}

/// A conversation turned into a publication-ready bundle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectOutput {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub executive_summary: String,
    pub article_markdown: String,
    pub tweet: String,
    pub key_stats: Vec<KeyStat>,
    pub charts: Vec<ChartRecommendation>,
    pub data_tables: Vec<DataTable>,
    pub methodology: String,
    pub limitations: String,
    pub verification_notes: String,
}

/// Outcome of checking every claim in an article.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ValidationReport {
    pub overall_status: OverallStatus,
    pub total_claims: usize,
    pub verified_claims: usize,
    pub failed_claims: usize,
    pub verification_score: f64,
    pub claims: Vec<ClaimVerification>,
    pub database_queries_run: usize,
    pub web_searches_performed: usize,
    pub summary: String,
    pub recommendation: Recommendation,
}

impl ValidationReport {
    /// Report for an article with nothing to check.
    #[must_use]
    pub fn no_claims() -> Self {
        Self {
            overall_status: OverallStatus::Verified,
            total_claims: 0,
            verified_claims: 0,
            failed_claims: 0,
            verification_score: 100.0,
            claims: Vec::new(),
            database_queries_run: 0,
            web_searches_performed: 0,
            summary: "No verifiable claims found in article.".to_string(),
            recommendation: Recommendation::ReadyToPublish,
        }
    }

    /// Score a set of checked claims.
    ///
    /// The score is the verified share as a percentage rounded to one decimal;
    /// status and recommendation follow [`enums::grade`].
    #[must_use]
    pub fn from_claims(
        claims: Vec<ClaimVerification>,
        database_queries_run: usize,
        web_searches_performed: usize,
    ) -> Self {
        if claims.is_empty() {
            return Self {
                database_queries_run,
                web_searches_performed,
                ..Self::no_claims()
            };
        }

        let total = claims.len();
        let verified = claims.iter().filter(|c| c.verified).count();
        let failed = total - verified;
        #[allow(clippy::cast_precision_loss)] // claim counts are tiny
        let score = verified as f64 / total as f64 * 100.0;
        let (overall_status, recommendation) = enums::grade(score);

        let summary = if failed == 0 {
            format!("All {total} claims verified successfully. Article is factually accurate.")
        } else {
            let issues: Vec<String> = claims
                .iter()
                .filter(|c| !c.verified)
                .take(3)
                .map(|c| format!("{}...", c.claim_text.chars().take(50).collect::<String>()))
                .collect();
            format!(
                "{failed} of {total} claims could not be verified. Issues: {}",
                issues.join("; ")
            )
        };

        Self {
            overall_status,
            total_claims: total,
            verified_claims: verified,
            failed_claims: failed,
            verification_score: (score * 10.0).round() / 10.0,
            claims,
            database_queries_run,
            web_searches_performed,
            summary,
            recommendation,
        }
    }

    /// Whether the report clears the publish gate.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        self.recommendation == Recommendation::ReadyToPublish
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::VerificationMethod;
    use pretty_assertions::assert_eq;

    fn claim(id: i64, text: &str, verified: bool) -> ClaimVerification {
        let mut claim =
            ClaimVerification::pending(id, text, "statistical", VerificationMethod::Database, None);
        claim.verified = verified;
        claim
    }

    #[test]
    fn no_claims_is_ready_to_publish() {
        let report = ValidationReport::from_claims(Vec::new(), 0, 0);
        assert_eq!(report.overall_status, OverallStatus::Verified);
        assert_eq!(report.recommendation, Recommendation::ReadyToPublish);
        assert_eq!(report.verification_score, 100.0);
        assert!(report.is_publishable());
    }

    #[test]
    fn all_verified_summary() {
        let report = ValidationReport::from_claims(
            vec![claim(1, "Kohli averages 37", true), claim(2, "Gayle hit 357 sixes", true)],
            2,
            0,
        );
        assert_eq!(report.verified_claims, 2);
        assert_eq!(
            report.summary,
            "All 2 claims verified successfully. Article is factually accurate."
        );
    }

    #[test]
    fn partial_failure_lists_up_to_three_issues() {
        let long = "x".repeat(80);
        let claims = vec![
            claim(1, "ok", true),
            claim(2, &long, false),
            claim(3, "second", false),
            claim(4, "third", false),
            claim(5, "fourth", false),
        ];
        let report = ValidationReport::from_claims(claims, 5, 0);

        assert_eq!(report.failed_claims, 4);
        assert_eq!(report.verification_score, 20.0);
        assert_eq!(report.overall_status, OverallStatus::Failed);
        assert_eq!(report.recommendation, Recommendation::MajorIssues);
        assert_eq!(
            report.summary,
            format!("4 of 5 claims could not be verified. Issues: {}...; second...; third...", "x".repeat(50))
        );
    }

    #[test]
    fn score_rounds_to_one_decimal() {
        let claims = vec![claim(1, "a", true), claim(2, "b", true), claim(3, "c", false)];
        let report = ValidationReport::from_claims(claims, 3, 0);
        assert_eq!(report.verification_score, 66.7);
    }
}
