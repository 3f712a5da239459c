use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{analyze_handler, index_handler};
use super::state::WebState;
use crate::application::ports::RelayApi;
use crate::infrastructure::observability::request_id_middleware;

/// Schematic photos routinely exceed axum's 2 MB default body cap.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn create_web_router<R>(state: WebState<R>) -> Router
where
    R: RelayApi + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(index_handler::<R>))
        .route("/analyze", post(analyze_handler::<R>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
