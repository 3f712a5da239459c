mod completion_client;
mod messenger;
mod relay_api;
mod transcription_engine;

pub use completion_client::{CompletionClient, CompletionClientError};
pub use messenger::{InlineButton, Messenger, MessengerError};
pub use relay_api::{AskReply, RelayApi, RelayApiError, RelayHealth};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
