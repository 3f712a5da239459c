use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Body of a relay `/ask` or `/transcribe` response. Error bodies carry a
/// `detail` field instead of `reply`, so the field is optional and callers
/// substitute their own fallback text when it is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub reply: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayHealth {
    pub status: String,
    pub model: String,
}

/// The relay HTTP contract as consumed by the two front ends.
#[async_trait]
pub trait RelayApi: Send + Sync {
    /// `POST /ask`. `timeout` overrides the client default for this one
    /// call; the bot passes `None` and keeps the platform default.
    async fn ask(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<AskReply, RelayApiError>;

    /// `POST /transcribe`, multipart field `file` (`voice.ogg`, `audio/ogg`).
    async fn transcribe(&self, audio: Vec<u8>) -> Result<AskReply, RelayApiError>;

    /// `GET /health`.
    async fn health(&self) -> Result<RelayHealth, RelayApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RelayApiError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("relay returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
