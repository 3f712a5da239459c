use std::sync::Arc;

use crate::application::ports::{CompletionClient, CompletionClientError};
use crate::domain::{Prompt, PromptError, SchematicImage};

/// Validates incoming prompt text and delegates one completion round trip.
/// Validation always runs first: an invalid prompt never reaches the client.
pub struct ReviewService<C>
where
    C: CompletionClient,
{
    completion_client: Arc<C>,
}

impl<C> ReviewService<C>
where
    C: CompletionClient,
{
    pub fn new(completion_client: Arc<C>) -> Self {
        Self { completion_client }
    }

    pub async fn ask(
        &self,
        text: &str,
        image_base64: Option<String>,
    ) -> Result<String, ReviewError> {
        let prompt = Prompt::new(text)?;
        let image = image_base64.map(SchematicImage::from_base64);

        let reply = self
            .completion_client
            .complete(&prompt, image.as_ref())
            .await
            .map_err(ReviewError::Completion)?;

        Ok(reply)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("invalid prompt: {0}")]
    InvalidPrompt(#[from] PromptError),
    #[error("completion: {0}")]
    Completion(CompletionClientError),
}
