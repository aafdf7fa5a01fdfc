use tracing::{debug, instrument};

use crate::embedding::TextEncoder;
use crate::similarity::cosine_similarity;

use super::error::ScoringError;
use super::types::MatchScore;

pub const RESUME_FIELD: &str = "resume";
pub const JD_FIELD: &str = "jd";

/// Scores a resume against a job description.
///
/// Holds the process-wide encoder. Stateless per call, so one instance is
/// shared by every request.
pub struct MatchScorer<E: TextEncoder> {
    encoder: E,
}

impl<E: TextEncoder + std::fmt::Debug> std::fmt::Debug for MatchScorer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchScorer")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl<E: TextEncoder> MatchScorer<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn embedding_dim(&self) -> usize {
        self.encoder.embedding_dim()
    }

    pub fn is_stub(&self) -> bool {
        self.encoder.is_stub()
    }

    /// Match score for `resume` against `jd`.
    #[instrument(skip_all, fields(resume_len = resume.len(), jd_len = jd.len()))]
    pub fn analyze(&self, resume: &str, jd: &str) -> Result<MatchScore, ScoringError> {
        let similarity = self.similarity(resume, jd)?;
        let score = MatchScore::from_similarity(similarity);

        debug!(similarity, match_score = score.match_score, "Scored pair");
        Ok(score)
    }

    /// Raw cosine similarity between the two document embeddings.
    pub fn similarity(&self, resume: &str, jd: &str) -> Result<f32, ScoringError> {
        require_text(RESUME_FIELD, resume)?;
        require_text(JD_FIELD, jd)?;

        let resume_embedding = self.encode_field(RESUME_FIELD, resume)?;
        let jd_embedding = self.encode_field(JD_FIELD, jd)?;

        let similarity = cosine_similarity(&resume_embedding, &jd_embedding)?;
        if !similarity.is_finite() {
            return Err(ScoringError::NonFinite { value: similarity });
        }

        Ok(similarity)
    }

    fn encode_field(&self, field: &'static str, text: &str) -> Result<Vec<f32>, ScoringError> {
        self.encoder
            .encode(text)
            .map_err(|source| ScoringError::Embedding { field, source })
    }
}

fn require_text(field: &'static str, text: &str) -> Result<(), ScoringError> {
    if text.trim().is_empty() {
        return Err(ScoringError::EmptyDocument { field });
    }
    Ok(())
}
