use std::sync::{Arc, Mutex};
use std::time::Duration;

use skhema::application::ports::{
    AskReply, InlineButton, Messenger, MessengerError, RelayApi, RelayApiError, RelayHealth,
};
use skhema::bot::{BotContext, dispatch_update, handle_callback, handle_message};
use skhema::infrastructure::telegram::{CallbackQuery, Chat, Message, PhotoSize, Update, Voice};

const CHAT_ID: i64 = 77;
const MESSAGE_ID: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Message {
        chat_id: i64,
        text: String,
    },
    Reply {
        chat_id: i64,
        message_id: i64,
        text: String,
    },
    ButtonReply {
        chat_id: i64,
        text: String,
        labels: Vec<String>,
    },
    CallbackAnswered {
        callback_id: String,
    },
}

struct MockMessenger {
    sent: Mutex<Vec<Sent>>,
    downloads: Mutex<Vec<String>>,
    file_bytes: Option<Vec<u8>>,
}

impl MockMessenger {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
            file_bytes: Some(b"png".to_vec()),
        }
    }

    fn with_failing_downloads() -> Self {
        Self {
            file_bytes: None,
            ..Self::new()
        }
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Messenger for MockMessenger {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), MessengerError> {
        self.sent.lock().unwrap().push(Sent::Reply {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_with_buttons(
        &self,
        chat_id: i64,
        _message_id: i64,
        text: &str,
        buttons: &[InlineButton],
    ) -> Result<(), MessengerError> {
        self.sent.lock().unwrap().push(Sent::ButtonReply {
            chat_id,
            text: text.to_string(),
            labels: buttons.iter().map(|b| b.label.clone()).collect(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError> {
        self.sent.lock().unwrap().push(Sent::CallbackAnswered {
            callback_id: callback_id.to_string(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, MessengerError> {
        self.downloads.lock().unwrap().push(file_id.to_string());
        self.file_bytes
            .clone()
            .ok_or_else(|| MessengerError::ApiRequestFailed("download failed".to_string()))
    }
}

enum RelayBehavior {
    Reply(&'static str),
    NoReplyField,
    ErrorBody(u16, &'static str),
    Unreachable,
}

struct MockRelay {
    behavior: RelayBehavior,
    asks: Mutex<Vec<(String, Option<String>)>>,
    transcribes: Mutex<Vec<Vec<u8>>>,
}

impl MockRelay {
    fn new(behavior: RelayBehavior) -> Self {
        Self {
            behavior,
            asks: Mutex::new(Vec::new()),
            transcribes: Mutex::new(Vec::new()),
        }
    }

    fn asks(&self) -> Vec<(String, Option<String>)> {
        self.asks.lock().unwrap().clone()
    }

    fn transcribes(&self) -> Vec<Vec<u8>> {
        self.transcribes.lock().unwrap().clone()
    }

    fn respond(&self) -> Result<AskReply, RelayApiError> {
        match &self.behavior {
            RelayBehavior::Reply(text) => Ok(AskReply {
                reply: Some(text.to_string()),
            }),
            RelayBehavior::NoReplyField => Ok(AskReply { reply: None }),
            RelayBehavior::ErrorBody(status, body) => Err(RelayApiError::Upstream {
                status: *status,
                body: body.to_string(),
            }),
            RelayBehavior::Unreachable => Err(RelayApiError::RequestFailed(
                "connection refused".to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl RelayApi for MockRelay {
    async fn ask(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
        _timeout: Option<Duration>,
    ) -> Result<AskReply, RelayApiError> {
        self.asks
            .lock()
            .unwrap()
            .push((prompt.to_string(), image_base64.map(String::from)));
        self.respond()
    }

    async fn transcribe(&self, audio: Vec<u8>) -> Result<AskReply, RelayApiError> {
        self.transcribes.lock().unwrap().push(audio);
        self.respond()
    }

    async fn health(&self) -> Result<RelayHealth, RelayApiError> {
        Ok(RelayHealth {
            status: "ok".to_string(),
            model: "deepseek-chat".to_string(),
        })
    }
}

type TestContext = (
    BotContext<MockMessenger, MockRelay>,
    Arc<MockMessenger>,
    Arc<MockRelay>,
);

fn context(messenger: MockMessenger, relay: MockRelay) -> TestContext {
    let messenger = Arc::new(messenger);
    let relay = Arc::new(relay);
    let ctx = BotContext {
        messenger: Arc::clone(&messenger),
        relay: Arc::clone(&relay),
        version: "0.2".to_string(),
    };
    (ctx, messenger, relay)
}

fn text_message(text: &str) -> Message {
    Message {
        message_id: MESSAGE_ID,
        chat: Chat { id: CHAT_ID },
        text: Some(text.to_string()),
        caption: None,
        photo: None,
        voice: None,
    }
}

fn photo_message(caption: Option<&str>) -> Message {
    Message {
        message_id: MESSAGE_ID,
        chat: Chat { id: CHAT_ID },
        text: None,
        caption: caption.map(String::from),
        photo: Some(vec![
            PhotoSize {
                file_id: "small".to_string(),
                width: 90,
                height: 67,
                file_size: Some(1300),
            },
            PhotoSize {
                file_id: "large".to_string(),
                width: 800,
                height: 600,
                file_size: Some(65000),
            },
        ]),
        voice: None,
    }
}

fn voice_message() -> Message {
    Message {
        message_id: MESSAGE_ID,
        chat: Chat { id: CHAT_ID },
        text: None,
        caption: None,
        photo: None,
        voice: Some(Voice {
            file_id: "voice-file".to_string(),
        }),
    }
}

fn callback(data: Option<&str>) -> CallbackQuery {
    CallbackQuery {
        id: "cb-1".to_string(),
        data: data.map(String::from),
        message: Some(text_message("Привет! Я агробот 🤖 v0.2")),
    }
}

#[tokio::test]
async fn given_start_command_when_handled_then_greets_with_three_buttons() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("")),
    );

    handle_message(&ctx, text_message("/start")).await.unwrap();

    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::ButtonReply {
            chat_id,
            text,
            labels,
        } => {
            assert_eq!(*chat_id, CHAT_ID);
            assert_eq!(
                text,
                "Привет! Я агробот 🤖 v0.2\nЗадай вопрос или выбери готовый:"
            );
            assert_eq!(
                labels,
                &[
                    "🌱 Уход за томатами",
                    "🐛 Вредители растений",
                    "💧 Когда поливать?"
                ]
            );
        }
        other => panic!("expected button reply, got {other:?}"),
    }
}

#[tokio::test]
async fn given_text_message_when_relay_replies_then_bot_replies_verbatim() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Поливайте раз в 2-3 дня")),
    );

    handle_message(&ctx, text_message("Как часто нужно поливать огурцы летом?"))
        .await
        .unwrap();

    assert_eq!(
        relay.asks(),
        vec![("Как часто нужно поливать огурцы летом?".to_string(), None)]
    );
    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Поливайте раз в 2-3 дня".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_text_message_when_relay_sends_error_body_then_bot_replies_fallback() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::ErrorBody(
            500,
            r#"{"detail":"Неожиданный формат ответа от API"}"#,
        )),
    );

    handle_message(&ctx, text_message("вопрос")).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка при обработке текста".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_text_message_when_reply_field_missing_then_bot_replies_fallback() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::NoReplyField),
    );

    handle_message(&ctx, text_message("вопрос")).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка при обработке текста".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_text_message_when_relay_unreachable_then_bot_sends_nothing() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Unreachable),
    );

    handle_message(&ctx, text_message("вопрос")).await.unwrap();

    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn given_known_callback_when_handled_then_asks_canned_prompt_and_acknowledges() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Поливайте раз в 2-3 дня")),
    );

    handle_callback(&ctx, callback(Some("watering")))
        .await
        .unwrap();

    assert_eq!(
        relay.asks(),
        vec![("Как часто нужно поливать огурцы летом?".to_string(), None)]
    );
    assert_eq!(
        messenger.sent(),
        vec![
            Sent::Message {
                chat_id: CHAT_ID,
                text: "Поливайте раз в 2-3 дня".to_string(),
            },
            Sent::CallbackAnswered {
                callback_id: "cb-1".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn given_unknown_callback_when_handled_then_only_acknowledges() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("unused")),
    );

    handle_callback(&ctx, callback(Some("nonsense")))
        .await
        .unwrap();

    assert!(relay.asks().is_empty());
    assert_eq!(
        messenger.sent(),
        vec![Sent::CallbackAnswered {
            callback_id: "cb-1".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_callback_error_body_when_handled_then_fallback_and_acknowledges() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::ErrorBody(504, "timeout")),
    );

    handle_callback(&ctx, callback(Some("pests"))).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![
            Sent::Message {
                chat_id: CHAT_ID,
                text: "Ошибка при обработке запроса".to_string(),
            },
            Sent::CallbackAnswered {
                callback_id: "cb-1".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn given_photo_with_caption_when_handled_then_caption_and_image_are_sent() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Полярность верная")),
    );

    handle_message(&ctx, photo_message(Some("Проверь полярность")))
        .await
        .unwrap();

    // b"png" base64-encodes to "cG5n".
    assert_eq!(
        relay.asks(),
        vec![(
            "Проверь полярность".to_string(),
            Some("cG5n".to_string())
        )]
    );
    assert_eq!(messenger.downloads(), vec!["large".to_string()]);
    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Полярность верная".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_photo_without_caption_when_handled_then_default_prompt_is_used() {
    let (ctx, _, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Это схема усилителя")),
    );

    handle_message(&ctx, photo_message(None)).await.unwrap();

    let asks = relay.asks();
    assert_eq!(asks.len(), 1);
    assert_eq!(asks[0].0, "Что изображено на фото?");
}

#[tokio::test]
async fn given_photo_when_relay_sends_error_body_then_photo_fallback() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::ErrorBody(500, "boom")),
    );

    handle_message(&ctx, photo_message(None)).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка при обработке изображения".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_voice_when_flow_succeeds_then_bot_replies_with_relay_text() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Поливайте раз в 2-3 дня")),
    );

    handle_message(&ctx, voice_message()).await.unwrap();

    assert_eq!(relay.transcribes(), vec![b"png".to_vec()]);
    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Поливайте раз в 2-3 дня".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_voice_when_relay_sends_error_body_then_audio_fallback() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::ErrorBody(500, "boom")),
    );

    handle_message(&ctx, voice_message()).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка обработки аудио".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_voice_when_download_fails_then_fixed_boundary_reply() {
    let (ctx, messenger, relay) = context(
        MockMessenger::with_failing_downloads(),
        MockRelay::new(RelayBehavior::Reply("unused")),
    );

    handle_message(&ctx, voice_message()).await.unwrap();

    assert!(relay.transcribes().is_empty());
    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка обработки голосового сообщения.".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_voice_when_relay_unreachable_then_fixed_boundary_reply() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Unreachable),
    );

    handle_message(&ctx, voice_message()).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Reply {
            chat_id: CHAT_ID,
            message_id: MESSAGE_ID,
            text: "Ошибка обработки голосового сообщения.".to_string(),
        }]
    );
}

#[tokio::test]
async fn given_update_with_callback_when_dispatched_then_callback_is_answered() {
    let (ctx, messenger, _) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("Ответ")),
    );

    let update = Update {
        update_id: 1,
        message: None,
        callback_query: Some(callback(Some("tomatoes"))),
    };
    dispatch_update(&ctx, update).await;

    assert!(
        messenger
            .sent()
            .iter()
            .any(|s| matches!(s, Sent::CallbackAnswered { .. }))
    );
}

#[tokio::test]
async fn given_empty_update_when_dispatched_then_nothing_happens() {
    let (ctx, messenger, relay) = context(
        MockMessenger::new(),
        MockRelay::new(RelayBehavior::Reply("unused")),
    );

    let update = Update {
        update_id: 2,
        message: None,
        callback_query: None,
    };
    dispatch_update(&ctx, update).await;

    assert!(messenger.sent().is_empty());
    assert!(relay.asks().is_empty());
}
