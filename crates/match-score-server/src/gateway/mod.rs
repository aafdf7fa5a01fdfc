//! HTTP gateway (Axum) for resume / job-description scoring.
//!
//! This module is primarily used by the `match-score` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::analyze_handler;
pub use state::HandlerState;

use matchscore::TextEncoder;

/// Response header describing how a request was handled.
pub const STATUS_HEADER: &str = "x-match-score-status";
pub const STATUS_OK: &str = "ok";
pub const STATUS_READY: &str = "ready";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";
pub const STATUS_ENCODER_ERROR: &str = "encoder_error";
pub const STATUS_TIMEOUT: &str = "timeout";
pub const STATUS_INTERNAL_ERROR: &str = "internal_error";

pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: TextEncoder + 'static,
{
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E>))
        .route("/analyze", post(analyze_handler::<E>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ComponentStatus {
    pub http: String,
    pub encoder: String,
    pub encoder_mode: String,
    pub embedding_dim: usize,
}

fn status_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));
    headers
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(),
        Json(HealthResponse {
            status: STATUS_OK.to_string(),
        }),
    )
        .into_response()
}

/// The encoder is loaded before the listener binds, so a serving process is
/// always ready; the body reports which backend is answering.
#[tracing::instrument(skip(state))]
pub async fn ready_handler<E>(State(state): State<HandlerState<E>>) -> Response
where
    E: TextEncoder + 'static,
{
    let encoder_mode = if state.scorer.is_stub() { "stub" } else { "model" };

    let components = ComponentStatus {
        http: STATUS_READY.to_string(),
        encoder: STATUS_READY.to_string(),
        encoder_mode: encoder_mode.to_string(),
        embedding_dim: state.scorer.embedding_dim(),
    };

    (
        StatusCode::OK,
        status_headers(),
        Json(ReadyResponse {
            status: STATUS_OK.to_string(),
            components,
        }),
    )
        .into_response()
}
