use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use skhema::application::services::{ReviewService, review_system_prompt};
use skhema::infrastructure::audio::WhisperEngine;
use skhema::infrastructure::llm::DeepSeekClient;
use skhema::infrastructure::observability::{TracingConfig, init_tracing};
use skhema::presentation::config::RelaySettings;
use skhema::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = RelaySettings::from_env();
    init_tracing(TracingConfig::default(), "relay");

    if settings.llm.api_key.is_empty() {
        tracing::warn!("DEEPSEEK_API_KEY is not set; upstream requests will be rejected");
    }

    let completion_client = Arc::new(DeepSeekClient::new(
        settings.llm.api_key.clone(),
        &settings.llm.api_url,
        settings.llm.model.clone(),
        settings.llm.max_tokens,
        review_system_prompt(settings.llm.max_tokens),
        Duration::from_secs(settings.llm.timeout_seconds),
    ));
    let transcription_engine = Arc::new(WhisperEngine::new(
        settings.transcription.api_key.clone(),
        &settings.transcription.api_url,
        settings.transcription.model.clone(),
    ));

    let review_service = Arc::new(ReviewService::new(completion_client));

    let state = AppState {
        review_service,
        transcription_engine,
        model_name: settings.llm.model.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
