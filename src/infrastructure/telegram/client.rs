use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{ApiResponse, File, Message, Update};
use crate::application::ports::{InlineButton, Messenger, MessengerError};

const API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API adapter speaking the JSON method endpoints under
/// `https://api.telegram.org/bot<token>/`.
pub struct TelegramClient {
    client: Client,
    token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self::with_api_base(token, API_BASE)
    }

    /// Point the client at a different host, used by tests to talk to a
    /// local stub server.
    pub fn with_api_base(token: String, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<T, B>(&self, method: &str, body: &B) -> Result<T, MessengerError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| MessengerError::ApiRequestFailed(e.to_string()))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| MessengerError::ApiRequestFailed(format!("decode {method}: {e}")))?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("{method} rejected without description"));
            return Err(MessengerError::Api(description));
        }

        envelope
            .result
            .ok_or_else(|| MessengerError::Api(format!("{method} returned no result")))
    }

    /// Long-polls `getUpdates`. A zero timeout makes the call return
    /// immediately with whatever is queued, which the dispatcher uses to
    /// drain stale updates on startup.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, MessengerError> {
        let mut body = json!({ "timeout": timeout_secs });
        if let Some(offset) = offset {
            body["offset"] = offset.into();
        }
        self.call("getUpdates", &body).await
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        let body = json!({ "chat_id": chat_id, "text": text });
        let _: Message = self.call("sendMessage", &body).await?;
        Ok(())
    }

    async fn reply_to(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), MessengerError> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "reply_to_message_id": message_id,
        });
        let _: Message = self.call("sendMessage", &body).await?;
        Ok(())
    }

    async fn reply_with_buttons(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        buttons: &[InlineButton],
    ) -> Result<(), MessengerError> {
        // One button per keyboard row.
        let rows: Vec<_> = buttons
            .iter()
            .map(|b| vec![json!({ "text": b.label, "callback_data": b.data })])
            .collect();
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "reply_to_message_id": message_id,
            "reply_markup": { "inline_keyboard": rows },
        });
        let _: Message = self.call("sendMessage", &body).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError> {
        let body = json!({ "callback_query_id": callback_id });
        let _: bool = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, MessengerError> {
        let body = json!({ "file_id": file_id });
        let file: File = self.call("getFile", &body).await?;
        let file_path = file
            .file_path
            .ok_or_else(|| MessengerError::Api("getFile returned no file_path".to_string()))?;

        let url = format!("{}/file/bot{}/{}", self.api_base, self.token, file_path);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MessengerError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MessengerError::ApiRequestFailed(format!(
                "file download failed with status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MessengerError::ApiRequestFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
