use schemars::schema_for;
use serde_json::Value;
use wicket_core::entities::{ProjectOutput, ValidationReport};
use wicket_core::responses::{
    AnalysisResponse, DeepAnalysisResponse, PublishResponse, RateLimitResponse,
};

use crate::cli::{SchemaArgs, WireType};

/// Handle `wicket schema`.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&schema_json(args.type_name))?);
    Ok(())
}

fn schema_json(wire_type: WireType) -> Value {
    let schema = match wire_type {
        WireType::Analysis => schema_for!(AnalysisResponse),
        WireType::DeepAnalysis => schema_for!(DeepAnalysisResponse),
        WireType::Project => schema_for!(ProjectOutput),
        WireType::Validation => schema_for!(ValidationReport),
        WireType::Publish => schema_for!(PublishResponse),
        WireType::RateLimit => schema_for!(RateLimitResponse),
    };
    schema.to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_titled_by_type() {
        assert_eq!(schema_json(WireType::Project)["title"], "ProjectOutput");
        assert_eq!(schema_json(WireType::RateLimit)["title"], "RateLimitResponse");
    }

    #[test]
    fn validation_schema_lists_recommendation() {
        let schema = schema_json(WireType::Validation);
        assert!(schema["properties"]["recommendation"].is_object());
    }
}
