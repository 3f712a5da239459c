#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Settings for the relay binary. Every field has a default so the relay
/// starts in any environment; a missing upstream key only surfaces when the
/// first completion call is rejected.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl RelaySettings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
            llm: LlmSettings {
                api_key: std::env::var("DEEPSEEK_API_KEY").unwrap_or_default(),
                api_url: std::env::var("DEEPSEEK_API_URL")
                    .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string()),
                model: std::env::var("MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
                max_tokens: std::env::var("MAX_TOKENS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
                timeout_seconds: std::env::var("UPSTREAM_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            },
            transcription: TranscriptionSettings {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                api_url: std::env::var("OPENAI_API_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: std::env::var("WHISPER_MODEL").unwrap_or_else(|_| "whisper-1".to_string()),
            },
        }
    }
}

/// Settings for the bot binary. The Telegram token has no sensible default,
/// so startup fails fast without it.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: String,
    pub relay_url: String,
    pub version: String,
}

impl BotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let token = std::env::var("TELEGRAM_TOKEN")
            .map_err(|_| SettingsError::MissingVar("TELEGRAM_TOKEN"))?;
        Ok(Self {
            token,
            relay_url: std::env::var("PROXY_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            version: std::env::var("BOT_VERSION").unwrap_or_else(|_| "0.2".to_string()),
        })
    }
}

/// Settings for the web UI binary.
#[derive(Debug, Clone)]
pub struct WebSettings {
    pub server: ServerSettings,
    pub relay_url: String,
}

impl WebSettings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: std::env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("WEB_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8501),
            },
            relay_url: std::env::var("API_URL").unwrap_or_else(|_| "http://proxy:8000".to_string()),
        }
    }
}
