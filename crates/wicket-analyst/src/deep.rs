use wicket_core::entities::PipelineStep;
use wicket_core::responses::DeepAnalysisResponse;
use wicket_llm::ModelClient;

use crate::Analyst;
use crate::error::AnalystError;

impl<C: ModelClient> Analyst<C> {
    /// Run a multi-step analysis and write it up.
    ///
    /// `max_steps` defaults to [`crate::DEFAULT_DEEP_STEPS`] and is clamped to
    /// the configured bound. Steps run in order; a failing query is recorded
    /// on its step and the remaining steps still run.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when any model call fails.
    pub async fn analyze_deep(
        &self,
        question: &str,
        max_steps: Option<u32>,
    ) -> Result<DeepAnalysisResponse, AnalystError> {
        let max_steps = self.deep_steps(max_steps);
        let planned = self.decompose(question, max_steps).await?;
        if planned.is_fallback() {
            tracing::info!("decomposition fell back to a single step");
        }

        let mut steps = Vec::new();
        for step in planned.into_inner() {
            steps.push(self.execute_step(step).await);
        }
        let total_records_analyzed = steps.iter().map(PipelineStep::row_count).sum();

        let draft = self.synthesize_article(question, &steps).await?.into_inner();
        let charts = self.recommend_charts(&steps).await?.into_inner();

        tracing::info!(
            steps = steps.len(),
            total_records_analyzed,
            charts = charts.len(),
            "deep analysis complete"
        );

        Ok(DeepAnalysisResponse {
            title: draft.title,
            executive_summary: draft.executive_summary,
            steps,
            article: draft.article,
            tweet: draft.tweet,
            charts,
            methodology: draft.methodology,
            limitations: draft.limitations,
            total_records_analyzed,
        })
    }

    async fn execute_step(&self, step: PipelineStep) -> PipelineStep {
        let Some(sql) = step.generated_query.clone() else {
            return step.without_query();
        };
        match self.lake.query(&sql).await {
            Ok(rows) => step.with_rows(rows),
            Err(error) => {
                tracing::warn!(step = step.step_number, %error, "step query failed");
                step.with_error(error.to_string())
            }
        }
    }
}
