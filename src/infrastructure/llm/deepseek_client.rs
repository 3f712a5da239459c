use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CompletionClient, CompletionClientError};
use crate::domain::{Prompt, SchematicImage};

/// Sampling is fixed for every call; only the model name and the output
/// budget come from configuration.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;
const FREQUENCY_PENALTY: f32 = 0.0;
const PRESENCE_PENALTY: f32 = 0.0;

/// Client for an OpenAI-compatible chat-completions endpoint (DeepSeek by
/// default). One call is exactly one upstream round trip: no retries, no
/// backoff, no streaming.
pub struct DeepSeekClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    system_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: usize,
    pub temperature: f32,
    pub stream: bool,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

/// User content is a plain string for text-only prompts and a typed part
/// list when a schematic image rides along.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    // An absent field and an empty array are the same failure to callers.
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl DeepSeekClient {
    pub fn new(
        api_key: String,
        api_url: &str,
        model: String,
        max_tokens: usize,
        system_prompt: String,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
            system_prompt,
        }
    }

    /// Assembles the full wire payload. Public so tests can assert the exact
    /// shape without a network.
    pub fn build_request(
        &self,
        prompt: &Prompt,
        image: Option<&SchematicImage>,
    ) -> CompletionRequest {
        let user_content = match image {
            Some(image) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.as_str().to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.to_data_uri(),
                        detail: "high",
                    },
                },
            ]),
            None => MessageContent::Text(prompt.as_str().to_string()),
        };

        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(self.system_prompt.clone()),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
            stream: false,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

#[async_trait]
impl CompletionClient for DeepSeekClient {
    async fn complete(
        &self,
        prompt: &Prompt,
        image: Option<&SchematicImage>,
    ) -> Result<String, CompletionClientError> {
        let request_body = self.build_request(prompt, image);
        let url = format!("{}/chat/completions", self.api_url);

        tracing::debug!(model = %self.model, has_image = image.is_some(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionClientError::Timeout
                } else {
                    CompletionClientError::ApiRequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionClientError::Timeout
            } else {
                CompletionClientError::InvalidResponse(e.to_string())
            }
        })?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionClientError::EmptyChoices)?
            .message
            .content;

        tracing::debug!(chars = reply.len(), "Completion received");

        Ok(reply)
    }
}
