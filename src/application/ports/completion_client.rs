use async_trait::async_trait;

use crate::domain::{Prompt, SchematicImage};

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Runs one completion round trip and returns the reply text.
    async fn complete(
        &self,
        prompt: &Prompt,
        image: Option<&SchematicImage>,
    ) -> Result<String, CompletionClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionClientError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("upstream response carried no choices")]
    EmptyChoices,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
