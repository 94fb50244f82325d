use wicket_llm::{ModelClient, strip_markdown_fence};

use crate::Analyst;
use crate::error::AnalystError;
use crate::prompts;

impl<C: ModelClient> Analyst<C> {
    /// Ask the model for one SQL query answering `question`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalystError::Gateway`] when the model cannot be reached.
    pub async fn generate_sql(&self, question: &str) -> Result<String, AnalystError> {
        let prompt = prompts::generate_sql(self.lake.schema_description(), question);
        let raw = self.gateway.invoke(&prompt).await?;
        Ok(strip_markdown_fence(&raw))
    }
}
