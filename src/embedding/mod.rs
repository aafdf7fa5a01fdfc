//! Embedding + model utilities.
//!
//! - [`encoder`] turns a document into a unit-length vector.
//! - [`TextEncoder`] is the seam the scorer and gateway are generic over.

/// BERT sentence model with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder (model or stub backend).
pub mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;

/// Anything that maps text to a fixed-length embedding.
///
/// Implementations must be deterministic for a fixed set of weights and safe
/// to call from many threads at once.
pub trait TextEncoder: Send + Sync {
    /// Encodes one document.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of every vector returned by [`encode`](TextEncoder::encode).
    fn embedding_dim(&self) -> usize;

    /// `true` when the encoder is not backed by a real model.
    fn is_stub(&self) -> bool {
        false
    }
}
