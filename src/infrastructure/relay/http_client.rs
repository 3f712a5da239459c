use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::application::ports::{AskReply, RelayApi, RelayApiError, RelayHealth};

/// Cap on any call to the relay. Individual asks may override this with a
/// shorter per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP adapter for the relay service consumed by the bot and the web UI.
pub struct RelayHttpClient {
    client: Client,
    base_url: String,
}

impl RelayHttpClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn upstream_error(response: reqwest::Response) -> RelayApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        RelayApiError::Upstream { status, body }
    }
}

#[async_trait]
impl RelayApi for RelayHttpClient {
    async fn ask(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<AskReply, RelayApiError> {
        let mut payload = json!({ "prompt": prompt });
        if let Some(image) = image_base64 {
            payload["image_base64"] = image.into();
        }

        let mut request = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(&payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RelayApiError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RelayApiError::InvalidResponse(e.to_string()))
    }

    async fn transcribe(&self, audio: Vec<u8>) -> Result<AskReply, RelayApiError> {
        let part = Part::bytes(audio)
            .file_name("voice.ogg")
            .mime_str("audio/ogg")
            .map_err(|e| RelayApiError::RequestFailed(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RelayApiError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RelayApiError::InvalidResponse(e.to_string()))
    }

    async fn health(&self) -> Result<RelayHealth, RelayApiError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| RelayApiError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RelayApiError::InvalidResponse(e.to_string()))
    }
}
