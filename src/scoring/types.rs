use serde::{Deserialize, Serialize};

use crate::constants::{SCORE_DECIMALS, SCORE_SCALE};

/// Rescales a cosine similarity to a percentage rounded to two decimals.
///
/// No clamping: `-0.25` becomes `-25.0`.
pub fn round_score(similarity: f32) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (f64::from(similarity) * SCORE_SCALE * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Result of comparing a resume to a job description.
pub struct MatchScore {
    /// `cosine_similarity * 100`, rounded to two decimals.
    pub match_score: f64,
}

impl MatchScore {
    /// Builds a score from a raw cosine similarity.
    pub fn from_similarity(similarity: f32) -> Self {
        Self {
            match_score: round_score(similarity),
        }
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.match_score)
    }
}
