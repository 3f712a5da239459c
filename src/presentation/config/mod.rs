mod settings;

pub use settings::{
    BotSettings, LlmSettings, RelaySettings, ServerSettings, SettingsError, TranscriptionSettings,
    WebSettings,
};
