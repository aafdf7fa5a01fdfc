use serde::{Deserialize, Serialize};
use serde_json::Value;

use matchscore::MatchScore;
use matchscore::scoring::scorer::{JD_FIELD, RESUME_FIELD};

use crate::gateway::error::GatewayError;

/// Body of `POST /analyze`. Extra fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub resume: String,
    pub jd: String,
}

/// Body of a successful `POST /analyze`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeResponse {
    pub match_score: f64,
}

impl From<MatchScore> for AnalyzeResponse {
    fn from(score: MatchScore) -> Self {
        Self {
            match_score: score.match_score,
        }
    }
}

impl AnalyzeRequest {
    /// Checks the raw JSON and converts it into a typed request.
    ///
    /// Reports which field is missing, `null`, not a string, or blank.
    pub fn from_json(value: Value) -> Result<Self, GatewayError> {
        let object = value.as_object().ok_or_else(|| {
            GatewayError::InvalidRequest("request body must be a JSON object".to_string())
        })?;

        for field in [RESUME_FIELD, JD_FIELD] {
            match object.get(field) {
                None | Some(Value::Null) => return Err(GatewayError::MissingField { field }),
                Some(Value::String(text)) if text.trim().is_empty() => {
                    return Err(GatewayError::InvalidRequest(format!(
                        "field '{field}' must not be empty"
                    )));
                }
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(GatewayError::InvalidRequest(format!(
                        "field '{field}' must be a string"
                    )));
                }
            }
        }

        serde_json::from_value(value)
            .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
    }
}
