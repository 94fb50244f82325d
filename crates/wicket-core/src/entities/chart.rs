use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChartKind;
use crate::lenient;

/// Columns a chart plots on each axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AxisFields {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub x_axis: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub y_axis: Option<String>,
}

/// A visualization the model suggests for one result set.
///
/// `data_reference` names the data it draws from (`step_2`, `dataset_0`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChartRecommendation {
    #[serde(rename = "chart_type")]
    pub chart_kind: ChartKind,
    pub title: String,
    #[serde(rename = "data_key", deserialize_with = "lenient::text")]
    pub data_reference: String,
    #[serde(flatten)]
    pub axis_fields: AxisFields,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}
