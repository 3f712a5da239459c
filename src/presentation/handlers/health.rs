use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{CompletionClient, TranscriptionEngine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Liveness probe. Reports the configured model without touching the
/// upstream API.
pub async fn health_handler<C, T>(State(state): State<AppState<C, T>>) -> impl IntoResponse
where
    C: CompletionClient + 'static,
    T: TranscriptionEngine + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            model: state.model_name.clone(),
        }),
    )
}
