use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::similarity::SimilarityError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{field} must be a non-empty document")]
    EmptyDocument { field: &'static str },

    #[error("encoding {field} failed: {source}")]
    Embedding {
        field: &'static str,
        #[source]
        source: EmbeddingError,
    },

    #[error("embedding comparison failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("similarity is not a finite number: {value}")]
    NonFinite { value: f32 },
}

impl ScoringError {
    /// `true` when the caller supplied bad input (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoringError::EmptyDocument { .. })
    }
}
