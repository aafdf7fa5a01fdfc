use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use matchscore::ScoringError;

use crate::gateway::{
    STATUS_ENCODER_ERROR, STATUS_HEADER, STATUS_INTERNAL_ERROR, STATUS_INVALID_REQUEST,
    STATUS_TIMEOUT,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid request body: {0}")]
    BodyRejected(#[from] JsonRejection),

    #[error("encoder failed: {0}")]
    EncoderFailed(String),

    #[error("analysis timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ScoringError> for GatewayError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::EmptyDocument { field } => {
                GatewayError::InvalidRequest(format!("field '{field}' must not be empty"))
            }
            ScoringError::Embedding { .. } => GatewayError::EncoderFailed(err.to_string()),
            ScoringError::Similarity(_) | ScoringError::NonFinite { .. } => {
                GatewayError::InternalError(err.to_string())
            }
        }
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingField { .. } | GatewayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::BodyRejected(rejection) => rejection.status(),
            GatewayError::EncoderFailed(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn status_tag(&self) -> &'static str {
        match self {
            GatewayError::MissingField { .. }
            | GatewayError::InvalidRequest(_)
            | GatewayError::BodyRejected(_) => STATUS_INVALID_REQUEST,
            GatewayError::EncoderFailed(_) => STATUS_ENCODER_ERROR,
            GatewayError::Timeout { .. } => STATUS_TIMEOUT,
            GatewayError::InternalError(_) => STATUS_INTERNAL_ERROR,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Analysis failed");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let mut headers = HeaderMap::new();
        headers.insert(STATUS_HEADER, HeaderValue::from_static(self.status_tag()));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
