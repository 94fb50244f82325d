//! The seam between the gateway and a concrete model API.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use crate::error::ModelError;

/// A text-in, text-out language model.
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the raw response text.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ModelError>> + Send;
}

/// In-memory client that replays queued responses in order.
///
/// Records every prompt it receives. Once the queue is empty each call fails
/// with [`ModelError::EmptyResponse`]. Used for offline runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that answers with `replies` in order.
    #[must_use]
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for reply in replies {
            client.push_reply(reply);
        }
        client
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock_responses().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, error: ModelError) {
        self.lock_responses().push_back(Err(error));
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, ModelError>>> {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ModelClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(prompt.to_string());
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::EmptyResponse("script exhausted".to_string())))
    }
}
