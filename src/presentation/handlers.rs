// HTTP request handlers
use crate::application::ingest_service::lock_pipeline;
use crate::infrastructure::chunked_stream::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/status", get(get_status))
        .route("/stream", get(stream_updates))
        .route("/reset", post(reset_pipeline))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current connection status, axis bounds and counters
pub async fn get_status(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = lock_pipeline(&state.pipeline).snapshot();

    match json_response(&snapshot, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Live display updates, starting from the moment of subscription
pub async fn stream_updates(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.updates.subscribe();
    tracing::debug!("Display stream subscribed, {} viewers", state.updates.subscriber_count());

    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

/// Caller-triggered reset, e.g. after the device was power-cycled
pub async fn reset_pipeline(State(state): State<Arc<AppState>>) -> StatusCode {
    lock_pipeline(&state.pipeline).reset();
    tracing::info!("Telemetry pipeline reset on request");

    StatusCode::NO_CONTENT
}
