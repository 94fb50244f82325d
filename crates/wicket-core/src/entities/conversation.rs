use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Row;
use crate::enums::MessageRole;

/// One turn of an exploratory chat, as sent back by the client on finalize.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Row>>,
}

/// A result set found in a conversation, with the question that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DataSet {
    pub query_context: String,
    pub sql_query: Option<String>,
    pub data: Vec<Row>,
    pub row_count: usize,
}

impl DataSet {
    /// Collect every non-empty result set in `conversation`.
    ///
    /// Each set is paired with the closest preceding user message, or an empty
    /// context when none exists.
    #[must_use]
    pub fn extract_all(conversation: &[ConversationMessage]) -> Vec<Self> {
        conversation
            .iter()
            .enumerate()
            .filter_map(|(index, message)| {
                let data = message.data.as_ref().filter(|rows| !rows.is_empty())?;
                let query_context = conversation[..index]
                    .iter()
                    .rev()
                    .find(|m| m.role == MessageRole::User)
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                Some(Self {
                    query_context,
                    sql_query: message.sql_query.clone(),
                    data: data.clone(),
                    row_count: data.len(),
                })
            })
            .collect()
    }
}
