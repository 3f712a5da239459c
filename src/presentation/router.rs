use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{CompletionClient, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{ask_handler, health_handler, transcribe_handler};
use crate::presentation::state::AppState;

/// Base64-encoded photos inflate request bodies well past axum's 2 MB
/// default cap.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn create_router<C, T>(state: AppState<C, T>) -> Router
where
    C: CompletionClient + 'static,
    T: TranscriptionEngine + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler::<C, T>))
        .route("/ask", post(ask_handler::<C, T>))
        .route("/transcribe", post(transcribe_handler::<C, T>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
