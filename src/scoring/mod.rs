//! Resume / job-description match scoring.
//!
//! [`MatchScorer`] encodes both documents with the same [`TextEncoder`],
//! takes the cosine similarity of the two embeddings and rescales it to a
//! 0–100 score rounded to two decimals.
//!
//! The score is not clamped. Cosine similarity lives in `[-1, 1]`, so a
//! pathological pair can report a negative score.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::MatchScorer;
pub use types::{MatchScore, round_score};
