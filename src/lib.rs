//! match-score library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`SentenceEncoder`], [`EncoderConfig`], [`TextEncoder`] - Embedding generation
//! - [`cosine_similarity`] - Vector comparison
//! - [`MatchScorer`], [`MatchScore`] - Resume / job-description scoring
//!
//! ## Test/Mock Support
//! [`MockEncoder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod scoring;
pub mod similarity;
pub mod text;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use embedding::{EmbeddingError, EncoderConfig, SentenceEncoder, TextEncoder};
pub use scoring::{MatchScore, MatchScorer, ScoringError};
pub use similarity::{SimilarityError, cosine_similarity};
