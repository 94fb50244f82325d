//! Entity structs for Wicket's request-scoped value objects.
//!
//! Rust field names describe what a value is; serde renames keep the JSON
//! field names of the HTTP contract (`sql_query`, `results`, `chart_type`, ...).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod chart;
mod claim;
mod conversation;
mod project;
mod step;

pub use chart::{AxisFields, ChartRecommendation};
pub use claim::ClaimVerification;
pub use conversation::{ConversationMessage, DataSet};
pub use project::{DataTable, KeyStat, ProjectOutput, ValidationReport};
pub use step::PipelineStep;
