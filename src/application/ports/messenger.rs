use async_trait::async_trait;

/// One inline quick-reply button: a visible label plus the callback payload
/// the platform echoes back when the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Outbound messaging-platform operations the bot handlers need. Kept
/// platform-neutral so handlers can be exercised against a recording mock.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError>;

    /// Sends `text` as a reply to an existing message.
    async fn reply_to(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), MessengerError>;

    /// Reply with an inline keyboard, one button per row.
    async fn reply_with_buttons(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        buttons: &[InlineButton],
    ) -> Result<(), MessengerError>;

    /// Acknowledges a callback query so the client stops showing a spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError>;

    /// Resolves a file id to a path and downloads the bytes.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, MessengerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MessengerError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("platform rejected the call: {0}")]
    Api(String),
}
