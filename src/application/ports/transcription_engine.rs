use async_trait::async_trait;

/// Speech-to-text over a vendor API. The audio bytes pass through untouched;
/// decoding happens entirely on the vendor side.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
