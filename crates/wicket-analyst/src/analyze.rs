use wicket_core::responses::AnalysisResponse;
use wicket_llm::ModelClient;

use crate::Analyst;
use crate::error::AnalystError;

impl<C: ModelClient> Analyst<C> {
    /// Answer a question with one generated query.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached and
    /// [`AnalystError::Lake`] when the generated SQL fails.
    pub async fn analyze(&self, question: &str) -> Result<AnalysisResponse, AnalystError> {
        let sql = self.generate_sql(question).await?;
        tracing::debug!(%sql, "running generated query");
        let rows = self.lake.query(&sql).await?;

        Ok(AnalysisResponse {
            markdown: format!(
                "### Analysis Results\nFound {} records based on your query.",
                rows.len()
            ),
            sql_used: sql,
            data: rows,
        })
    }
}
