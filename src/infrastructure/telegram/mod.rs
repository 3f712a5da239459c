mod client;
mod types;

pub use client::TelegramClient;
pub use types::{ApiResponse, CallbackQuery, Chat, File, Message, PhotoSize, Update, Voice};
