use std::sync::Arc;

use crate::application::ports::{CompletionClient, TranscriptionEngine};
use crate::application::services::ReviewService;

pub struct AppState<C, T>
where
    C: CompletionClient,
    T: TranscriptionEngine,
{
    pub review_service: Arc<ReviewService<C>>,
    pub transcription_engine: Arc<T>,
    /// Model identifier reported by `/health`.
    pub model_name: String,
}

impl<C, T> Clone for AppState<C, T>
where
    C: CompletionClient,
    T: TranscriptionEngine,
{
    fn clone(&self) -> Self {
        Self {
            review_service: Arc::clone(&self.review_service),
            transcription_engine: Arc::clone(&self.transcription_engine),
            model_name: self.model_name.clone(),
        }
    }
}
