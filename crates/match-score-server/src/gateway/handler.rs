use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use matchscore::{MatchScore, TextEncoder};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AnalyzeRequest, AnalyzeResponse};
use crate::gateway::state::HandlerState;
use crate::gateway::{STATUS_HEADER, STATUS_OK};

/// `POST /analyze`: scores `resume` against `jd`.
///
/// Encoding runs on the blocking pool and is bounded by the state's request
/// timeout. On timeout the blocking task is left to finish on its own; its
/// result is discarded.
#[instrument(
    skip(state, body),
    fields(request_id = %uuid::Uuid::new_v4(), resume_len = tracing::field::Empty, jd_len = tracing::field::Empty)
)]
pub async fn analyze_handler<E>(
    State(state): State<HandlerState<E>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    E: TextEncoder + 'static,
{
    let Json(raw) = body?;
    let request = AnalyzeRequest::from_json(raw)?;

    let span = tracing::Span::current();
    span.record("resume_len", request.resume.len());
    span.record("jd_len", request.jd.len());

    let started = Instant::now();
    let score = run_analysis(&state, request).await?;

    info!(
        match_score = score.match_score,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis complete"
    );

    Ok(make_response(score))
}

async fn run_analysis<E>(
    state: &HandlerState<E>,
    request: AnalyzeRequest,
) -> Result<MatchScore, GatewayError>
where
    E: TextEncoder + 'static,
{
    let scorer = Arc::clone(&state.scorer);
    let task = tokio::task::spawn_blocking(move || scorer.analyze(&request.resume, &request.jd));

    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(join_err)) => Err(GatewayError::InternalError(format!(
            "analysis task failed: {}",
            join_err
        ))),
        Err(_) => {
            debug!(
                timeout_ms = state.request_timeout.as_millis() as u64,
                "Analysis exceeded request timeout"
            );
            Err(GatewayError::Timeout {
                after_ms: state.request_timeout.as_millis() as u64,
            })
        }
    }
}

pub(crate) fn make_response(score: MatchScore) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_OK));

    (StatusCode::OK, headers, Json(AnalyzeResponse::from(score))).into_response()
}
