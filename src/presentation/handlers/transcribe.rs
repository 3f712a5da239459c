use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::ask::{AskResponse, ErrorResponse, review_error_parts};
use crate::application::ports::{CompletionClient, TranscriptionEngine};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

/// Accepts a voice recording as multipart field `file`, transcribes it and
/// feeds the transcript through the same review flow as `/ask`.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<C, T>(
    State(state): State<AppState<C, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: CompletionClient + 'static,
    T: TranscriptionEngine + 'static,
{
    let mut audio: Option<Vec<u8>> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                match field.bytes().await {
                    Ok(data) => audio = Some(data.to_vec()),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                detail: format!("Failed to read file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        detail: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let audio = match audio {
        Some(a) => a,
        None => {
            tracing::warn!("Transcribe request with no file field");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    detail: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(bytes = audio.len(), "Audio received");

    let transcript = match state.transcription_engine.transcribe(&audio).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(transcript = %sanitize_prompt(&transcript), "Transcription complete");

    match state.review_service.ask(&transcript, None).await {
        Ok(reply) => (StatusCode::OK, Json(AskResponse { reply })).into_response(),
        Err(e) => {
            let (status, detail) = review_error_parts(&e);
            tracing::error!(error = %e, status = %status, "Transcribed ask failed");
            (status, Json(ErrorResponse { detail })).into_response()
        }
    }
}
