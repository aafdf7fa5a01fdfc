//! Cross-cutting, shared constants.
//!
//! The defaults describe `all-MiniLM-L6-v2`, the sentence-transformer the
//! service is tuned for. A different BERT-family model works as long as its
//! `hidden_size` matches the configured embedding dimension.

/// Embedding dimension of `all-MiniLM-L6-v2`.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token budget per document. Longer documents are truncated by the tokenizer.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Multiplier applied to cosine similarity to obtain a match score.
pub const SCORE_SCALE: f64 = 100.0;

/// Decimal places kept in a reported match score.
pub const SCORE_DECIMALS: i32 = 2;

/// Default upper bound for a single analysis, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 12_000;

/// Default request body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Model files expected inside a model directory.
pub const MODEL_CONFIG_FILE: &str = "config.json";
pub const MODEL_WEIGHTS_FILE: &str = "model.safetensors";
pub const MODEL_TOKENIZER_FILE: &str = "tokenizer.json";
