use wicket_core::entities::{ChartRecommendation, DataSet, PipelineStep};
use wicket_llm::ModelClient;

use super::{StageOutcome, parse_json_items};
use crate::Analyst;
use crate::error::AnalystError;
use crate::prompts;

impl<C: ModelClient> Analyst<C> {
    /// Suggest charts for the deep-analysis steps that returned rows.
    ///
    /// Skips the model call when no step has data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn recommend_charts(
        &self,
        steps: &[PipelineStep],
    ) -> Result<StageOutcome<Vec<ChartRecommendation>>, AnalystError> {
        if !steps.iter().any(PipelineStep::has_rows) {
            return Ok(StageOutcome::Parsed(Vec::new()));
        }
        self.charts_from("recommend_charts", prompts::recommend_charts(steps))
            .await
    }

    /// Suggest charts for the data sets of a finalized conversation.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn recommend_charts_for_data_sets(
        &self,
        data_sets: &[DataSet],
    ) -> Result<StageOutcome<Vec<ChartRecommendation>>, AnalystError> {
        if data_sets.iter().all(|set| set.data.is_empty()) {
            return Ok(StageOutcome::Parsed(Vec::new()));
        }
        self.charts_from(
            "recommend_charts_for_data_sets",
            prompts::recommend_charts_for_data_sets(data_sets),
        )
        .await
    }

    async fn charts_from(
        &self,
        stage: &'static str,
        prompt: String,
    ) -> Result<StageOutcome<Vec<ChartRecommendation>>, AnalystError> {
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(match parse_json_items(stage, &raw) {
            Some(charts) => StageOutcome::Parsed(charts),
            None => StageOutcome::Fallback(Vec::new()),
        })
    }
}
