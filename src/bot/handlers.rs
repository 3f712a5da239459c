use super::context::BotContext;
use crate::application::ports::{InlineButton, Messenger, MessengerError, RelayApi, RelayApiError};
use crate::domain::SchematicImage;
use crate::infrastructure::telegram::{CallbackQuery, Message, PhotoSize};

const TEXT_FALLBACK: &str = "Ошибка при обработке текста";
const CALLBACK_FALLBACK: &str = "Ошибка при обработке запроса";
const PHOTO_FALLBACK: &str = "Ошибка при обработке изображения";
const AUDIO_FALLBACK: &str = "Ошибка обработки аудио";
const VOICE_FAILURE_TEXT: &str = "Ошибка обработки голосового сообщения.";
const DEFAULT_PHOTO_PROMPT: &str = "Что изображено на фото?";

/// Canned questions behind the quick-reply buttons. Callback data that is
/// not in this table is acknowledged and otherwise ignored.
fn canned_prompt(data: &str) -> Option<&'static str> {
    match data {
        "tomatoes" => Some("Как ухаживать за томатами в открытом грунте?"),
        "pests" => Some("Какие признаки появления вредителей на листьях?"),
        "watering" => Some("Как часто нужно поливать огурцы летом?"),
        _ => None,
    }
}

fn quick_reply_buttons() -> Vec<InlineButton> {
    vec![
        InlineButton::new("🌱 Уход за томатами", "tomatoes"),
        InlineButton::new("🐛 Вредители растений", "pests"),
        InlineButton::new("💧 Когда поливать?", "watering"),
    ]
}

/// Routes a message to the matching handler. Unsupported content is
/// silently ignored.
pub async fn handle_message<M, R>(
    ctx: &BotContext<M, R>,
    message: Message,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    let chat_id = message.chat.id;
    let message_id = message.message_id;

    if let Some(voice) = &message.voice {
        return handle_voice(ctx, chat_id, message_id, &voice.file_id).await;
    }

    if let Some(photo) = &message.photo {
        // Variants arrive smallest to largest, so the last one is the
        // highest resolution.
        if let Some(largest) = photo.last() {
            return handle_photo(ctx, chat_id, message_id, largest, message.caption.as_deref())
                .await;
        }
    }

    if let Some(text) = &message.text {
        if text == "/start" {
            return handle_start(ctx, chat_id, message_id).await;
        }
        return handle_text(ctx, chat_id, message_id, text).await;
    }

    Ok(())
}

async fn handle_start<M, R>(
    ctx: &BotContext<M, R>,
    chat_id: i64,
    message_id: i64,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    let greeting = format!(
        "Привет! Я агробот 🤖 v{}\nЗадай вопрос или выбери готовый:",
        ctx.version
    );
    ctx.messenger
        .reply_with_buttons(chat_id, message_id, &greeting, &quick_reply_buttons())
        .await
}

async fn handle_text<M, R>(
    ctx: &BotContext<M, R>,
    chat_id: i64,
    message_id: i64,
    text: &str,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    if let Some(reply) = relay_reply(ctx.relay.as_ref(), text, None, TEXT_FALLBACK).await {
        ctx.messenger.reply_to(chat_id, message_id, &reply).await?;
    }
    Ok(())
}

async fn handle_photo<M, R>(
    ctx: &BotContext<M, R>,
    chat_id: i64,
    message_id: i64,
    photo: &PhotoSize,
    caption: Option<&str>,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    let bytes = ctx.messenger.download_file(&photo.file_id).await?;
    let image = SchematicImage::from_bytes(&bytes);
    let prompt = caption.unwrap_or(DEFAULT_PHOTO_PROMPT);

    tracing::debug!(bytes = bytes.len(), "Photo downloaded");

    if let Some(reply) = relay_reply(
        ctx.relay.as_ref(),
        prompt,
        Some(image.as_base64()),
        PHOTO_FALLBACK,
    )
    .await
    {
        ctx.messenger.reply_to(chat_id, message_id, &reply).await?;
    }
    Ok(())
}

/// The voice path is a bounded error boundary. Any failure inside it is
/// logged and answered with one fixed message; nothing propagates to the
/// dispatch loop.
async fn handle_voice<M, R>(
    ctx: &BotContext<M, R>,
    chat_id: i64,
    message_id: i64,
    file_id: &str,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    if let Err(e) = try_handle_voice(ctx, chat_id, message_id, file_id).await {
        tracing::error!(error = %e, "Voice processing failed");
        ctx.messenger
            .reply_to(chat_id, message_id, VOICE_FAILURE_TEXT)
            .await?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum VoiceError {
    #[error(transparent)]
    Messenger(#[from] MessengerError),
    #[error(transparent)]
    Relay(#[from] RelayApiError),
}

async fn try_handle_voice<M, R>(
    ctx: &BotContext<M, R>,
    chat_id: i64,
    message_id: i64,
    file_id: &str,
) -> Result<(), VoiceError>
where
    M: Messenger,
    R: RelayApi,
{
    let audio = ctx.messenger.download_file(file_id).await?;
    tracing::debug!(bytes = audio.len(), "Voice downloaded");

    let text = match ctx.relay.transcribe(audio).await {
        Ok(reply) => reply.reply.unwrap_or_else(|| AUDIO_FALLBACK.to_string()),
        Err(RelayApiError::Upstream { status, body }) => {
            tracing::warn!(status, body = %body, "Relay rejected voice upload");
            AUDIO_FALLBACK.to_string()
        }
        Err(e) => return Err(e.into()),
    };

    ctx.messenger.reply_to(chat_id, message_id, &text).await?;
    Ok(())
}

/// Looks up the canned prompt for a callback, asks the relay and posts the
/// answer into the originating chat. The callback is always acknowledged,
/// even when nothing was sent.
pub async fn handle_callback<M, R>(
    ctx: &BotContext<M, R>,
    callback: CallbackQuery,
) -> Result<(), MessengerError>
where
    M: Messenger,
    R: RelayApi,
{
    let canned = callback.data.as_deref().and_then(canned_prompt);
    if let (Some(prompt), Some(message)) = (canned, &callback.message) {
        let chat_id = message.chat.id;
        if let Some(reply) =
            relay_reply(ctx.relay.as_ref(), prompt, None, CALLBACK_FALLBACK).await
        {
            ctx.messenger.send_message(chat_id, &reply).await?;
        }
    }
    ctx.messenger.answer_callback(&callback.id).await
}

/// One relay round trip with the per-path fallback text. An error body from
/// the relay yields the fallback; a transport failure yields `None` and the
/// user gets no message.
async fn relay_reply<R>(
    relay: &R,
    prompt: &str,
    image_base64: Option<&str>,
    fallback: &str,
) -> Option<String>
where
    R: RelayApi,
{
    match relay.ask(prompt, image_base64, None).await {
        Ok(reply) => Some(reply.reply.unwrap_or_else(|| fallback.to_string())),
        Err(RelayApiError::Upstream { status, body }) => {
            tracing::warn!(status, body = %body, "Relay returned error status");
            Some(fallback.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay request failed");
            None
        }
    }
}
