use serde::Deserialize;
use wicket_core::entities::PipelineStep;
use wicket_core::lenient;
use wicket_llm::ModelClient;

use super::{StageOutcome, parse_json_items};
use crate::Analyst;
use crate::error::AnalystError;
use crate::prompts;

/// One step as the model writes it. Every field is optional.
#[derive(Debug, Deserialize)]
struct PlannedStep {
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    step_number: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    research_question: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    sql_query: Option<String>,
}

impl<C: ModelClient> Analyst<C> {
    /// Split `question` into at most `max_steps` steps, each with its SQL.
    ///
    /// One model call produces both the plan and the queries. Extra steps are
    /// dropped. An unparseable or empty answer becomes a single "Main
    /// Analysis" step without SQL.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn decompose(
        &self,
        question: &str,
        max_steps: u32,
    ) -> Result<StageOutcome<Vec<PipelineStep>>, AnalystError> {
        let prompt = prompts::decompose(self.lake.schema_description(), question, max_steps);
        let raw = self.gateway.invoke(&prompt).await?;

        let planned = parse_json_items::<PlannedStep>("decompose", &raw)
            .filter(|steps| !steps.is_empty());
        let Some(planned) = planned else {
            return Ok(StageOutcome::Fallback(vec![PipelineStep::planned(
                1,
                "Main Analysis",
                question,
                None,
            )]));
        };

        let steps = planned
            .into_iter()
            .take(max_steps as usize)
            .zip(1_u32..)
            .map(|(step, position)| {
                PipelineStep::planned(
                    step.step_number.unwrap_or(position),
                    step.title.unwrap_or_else(|| "Analysis Step".to_string()),
                    step.research_question.unwrap_or_default(),
                    step.sql_query.filter(|sql| !sql.trim().is_empty()),
                )
            })
            .collect();
        Ok(StageOutcome::Parsed(steps))
    }
}
