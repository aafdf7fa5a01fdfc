//! Sentence encoder (BERT + mean pooling, or a lexical stub).
//!
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::EncoderConfig;

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::TextEncoder;
use crate::embedding::bert::SentenceBert;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer_with_truncation;
use crate::hashing::feature_bucket;
use crate::similarity::l2_normalize;
use crate::text::{keywords, words};

enum EncoderBackend {
    Model {
        model: SentenceBert,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Produces unit-length document embeddings.
///
/// Loaded once at startup and shared read-only; `encode` takes `&self` and
/// needs no lock.
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!(
                embedding_dim = config.embedding_dim,
                "Encoder running in STUB mode (lexical feature hashing)"
            );
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for encoder");

        let (model, tokenizer) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    fn load_model(
        config: &EncoderConfig,
        device: &Device,
    ) -> Result<(SentenceBert, tokenizers::Tokenizer), EmbeddingError> {
        let tokenizer =
            load_tokenizer_with_truncation(&config.tokenizer_path(), config.max_seq_len).map_err(
                |e| EmbeddingError::TokenizationFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                },
            )?;

        let model = SentenceBert::load(&config.model_dir, device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        check_sequence_budget(config.max_seq_len, model.max_position_embeddings())?;

        if model.hidden_size() != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        Ok((model, tokenizer))
    }

    /// Generates an embedding for a single document.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &SentenceBert,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Err(EmbeddingError::TokenizationFailed {
                reason: "tokenizer produced no tokens".to_string(),
            });
        }

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            "Generating embedding (transformer forward pass)"
        );

        let to_input = |values: &[u32]| -> Result<Tensor, EmbeddingError> {
            Tensor::new(values, device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Failed to create input tensor: {}", e),
                })
        };

        let input_ids = to_input(ids)?;
        let token_type_ids = to_input(encoding.get_type_ids())?;
        let attention_mask = to_input(encoding.get_attention_mask())?;

        let mut embedding = model
            .forward_pooled(&input_ids, &token_type_ids, &attention_mask)
            .and_then(|pooled| pooled.to_vec1::<f32>())
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    /// Feature-hashed bag of keywords.
    ///
    /// Falls back to raw words, then to the trimmed text, so every non-blank
    /// document gets a non-zero vector.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut features = keywords(text);
        if features.is_empty() {
            features = words(text);
        }
        if features.is_empty() && !text.trim().is_empty() {
            features.push(text.trim().to_string());
        }

        let mut embedding = vec![0.0f32; self.config.embedding_dim];
        for feature in &features {
            embedding[feature_bucket(feature, self.config.embedding_dim)] += 1.0;
        }

        l2_normalize(&mut embedding);
        embedding
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

}

/// Rejects a token budget longer than the model's position table.
fn check_sequence_budget(max_seq_len: usize, max_positions: usize) -> Result<(), EmbeddingError> {
    if max_seq_len > max_positions {
        return Err(EmbeddingError::InvalidConfig {
            reason: format!(
                "max_seq_len ({max_seq_len}) exceeds model max_position_embeddings ({max_positions})"
            ),
        });
    }
    Ok(())
}

impl TextEncoder for SentenceEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        SentenceEncoder::embedding_dim(self)
    }

    fn is_stub(&self) -> bool {
        SentenceEncoder::is_stub(self)
    }
}
