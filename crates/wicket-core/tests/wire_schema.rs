//! Wire-shape checks: payloads in the HTTP contract's field names validate
//! against the schemars schemas and deserialize into the domain types.

use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::json;
use wicket_core::entities::ValidationReport;
use wicket_core::enums::{ChartKind, Recommendation, VerificationMethod};
use wicket_core::requests::PublishRequest;
use wicket_core::responses::DeepAnalysisResponse;

fn schema_errors(schema: &serde_json::Value, instance: &serde_json::Value) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn deep_analysis_payload() -> serde_json::Value {
    json!({
        "title": "The Nervous Nineties",
        "executive_summary": "Batters slow down before a hundred.",
        "steps": [
            {
                "step_number": 1,
                "title": "Strike rate by score band",
                "research_question": "Do batters slow down in the 90s?",
                "sql_query": "SELECT 1 AS band, 88.5 AS strike_rate",
                "results": [{"band": 1, "strike_rate": 88.5}],
                "insight": "Found 1 records. Key metric (band): 1",
                "error": null
            },
            {
                "step_number": 2,
                "title": "Conversion",
                "research_question": "Who converts?",
                "sql_query": "SELEC",
                "results": null,
                "insight": "Query failed: Parser Error",
                "error": "Parser Error"
            }
        ],
        "article": "# The Nervous Nineties",
        "tweet": "Nineties are nervy. [link]",
        "charts": [
            {
                "chart_type": "bar",
                "title": "Strike rate drops by 20%",
                "data_key": "step_1",
                "x_axis": "band",
                "y_axis": "strike_rate",
                "description": "Scoring slows"
            }
        ],
        "methodology": "Ball-by-ball SQL.",
        "limitations": "Men's cricket only.",
        "total_records_analyzed": 1
    })
}

fn validation_payload(recommendation: &str) -> serde_json::Value {
    json!({
        "overall_status": "PARTIAL",
        "total_claims": 1,
        "verified_claims": 1,
        "failed_claims": 0,
        "verification_score": 100.0,
        "claims": [{
            "claim_id": 1,
            "claim_text": "Kohli's strike rate is 131.97",
            "claim_type": "player_stat",
            "verification_method": "database_query",
            "sql_query": "SELECT 131.97",
            "sql_result": [{"strike_rate": 131.97}],
            "web_search_query": null,
            "web_search_result": null,
            "expected_value": "131.97",
            "actual_value": "131.97",
            "is_verified": true,
            "discrepancy_percent": 0.0,
            "notes": "Verified within 5% tolerance (discrepancy: 0.0%)"
        }],
        "database_queries_run": 1,
        "web_searches_performed": 0,
        "summary": "All 1 claims verified successfully. Article is factually accurate.",
        "recommendation": recommendation
    })
}

#[test]
fn deep_analysis_payload_matches_schema() {
    let schema = serde_json::to_value(schema_for!(DeepAnalysisResponse)).unwrap();
    let payload = deep_analysis_payload();
    let errors = schema_errors(&schema, &payload);
    assert!(errors.is_empty(), "schema errors: {errors:?}");

    let parsed: DeepAnalysisResponse = serde_json::from_value(payload).unwrap();
    assert_eq!(parsed.steps[1].error_text.as_deref(), Some("Parser Error"));
    assert_eq!(parsed.charts[0].chart_kind, ChartKind::Bar);
}

#[test]
fn validation_report_payload_matches_schema() {
    let schema = serde_json::to_value(schema_for!(ValidationReport)).unwrap();
    let payload = validation_payload("READY_TO_PUBLISH");
    let errors = schema_errors(&schema, &payload);
    assert!(errors.is_empty(), "schema errors: {errors:?}");

    let report: ValidationReport = serde_json::from_value(payload).unwrap();
    assert!(report.is_publishable());
    assert_eq!(
        report.claims[0].verification_method,
        VerificationMethod::Database
    );
    assert!(report.claims[0].verified);
}

#[test]
fn publish_request_accepts_unknown_recommendation() {
    let payload = json!({
        "project": {
            "slug": "nervous-nineties",
            "title": "The Nervous Nineties",
            "author": "Analytics Desk",
            "date": "2025-01-01",
            "executive_summary": "",
            "article_markdown": "",
            "tweet": "",
            "key_stats": [{"label": "Strike Rate", "value": 88.5, "context": "From 1 records"}],
            "charts": [],
            "data_tables": [{"table_id": "table_0", "title": "Bands", "data": [{"band": 1}], "row_count": 1}],
            "methodology": "",
            "limitations": "",
            "verification_notes": ""
        },
        "validation": validation_payload("LOOKS_FINE"),
    });

    let request: PublishRequest = serde_json::from_value(payload).unwrap();
    assert_eq!(request.validation.recommendation, Recommendation::Unrecognized);
    assert!(!request.validation.is_publishable());
    assert_eq!(request.project.key_stats[0].value, "88.5");
    assert_eq!(request.output_folder, None);
}
