use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CompletionClient, CompletionClientError, TranscriptionEngine};
use crate::application::services::ReviewError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

pub const TIMEOUT_DETAIL: &str = "Превышено время ожидания ответа от API";
pub const BAD_UPSTREAM_FORMAT_DETAIL: &str = "Неожиданный формат ответа от API";

#[derive(Deserialize)]
pub struct AskRequest {
    pub prompt: String,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub reply: String,
}

/// Error body shape shared by every relay endpoint.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler<C, T>(
    State(state): State<AppState<C, T>>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse
where
    C: CompletionClient + 'static,
    T: TranscriptionEngine + 'static,
{
    tracing::debug!(
        prompt = %sanitize_prompt(&request.prompt),
        has_image = request.image_base64.is_some(),
        "Processing ask"
    );

    match state
        .review_service
        .ask(&request.prompt, request.image_base64)
        .await
    {
        Ok(reply) => {
            tracing::info!(reply_chars = reply.chars().count(), "Ask successful");
            (StatusCode::OK, Json(AskResponse { reply })).into_response()
        }
        Err(e) => {
            let (status, detail) = review_error_parts(&e);
            tracing::error!(error = %e, status = %status, "Ask failed");
            (status, Json(ErrorResponse { detail })).into_response()
        }
    }
}

/// Maps a review failure to the wire status and `detail` text. Timeouts and
/// malformed upstream replies carry fixed Russian messages the front ends
/// show verbatim.
pub(super) fn review_error_parts(error: &ReviewError) -> (StatusCode, String) {
    match error {
        ReviewError::InvalidPrompt(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        ReviewError::Completion(CompletionClientError::Timeout) => {
            (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_DETAIL.to_string())
        }
        ReviewError::Completion(CompletionClientError::EmptyChoices) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            BAD_UPSTREAM_FORMAT_DETAIL.to_string(),
        ),
        ReviewError::Completion(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
