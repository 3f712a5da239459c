mod deepseek_client;

pub use deepseek_client::{
    ChatMessage, CompletionRequest, ContentPart, DeepSeekClient, ImageUrl, MessageContent,
};
