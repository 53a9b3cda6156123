use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::invocation_id_middleware;
use crate::presentation::handlers::{
    completion_event_handler, health_handler, upload_event_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/events/upload", post(upload_event_handler))
        .route("/events/completion", post(completion_event_handler))
        .layer(middleware::from_fn(invocation_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
