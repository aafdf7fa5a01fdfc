use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{EmbeddingError, EncoderConfig, SentenceEncoder, TextEncoder};

#[derive(Debug, Clone)]
enum MockBehavior {
    Stub,
    Fail(String),
    Fixed {
        vectors: HashMap<String, Vec<f32>>,
        dim: usize,
    },
}

/// Scriptable [`TextEncoder`] for tests.
///
/// By default it behaves like the stub [`SentenceEncoder`]. It can be told to
/// fail every call, to return fixed vectors, or to block for a while before
/// answering (to exercise request timeouts).
#[derive(Debug, Clone)]
pub struct MockEncoder {
    inner: Arc<SentenceEncoder>,
    behavior: MockBehavior,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockEncoder {
    /// Stub-backed mock with the default embedding dimension.
    pub fn new() -> Self {
        let inner = SentenceEncoder::load(EncoderConfig::stub())
            .expect("stub encoder config is always valid");
        Self {
            inner: Arc::new(inner),
            behavior: MockBehavior::Stub,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call fails with [`EmbeddingError::InferenceFailed`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(reason.into()),
            ..Self::new()
        }
    }

    /// Returns the given vector for each listed text; unlisted text fails.
    ///
    /// The reported embedding dimension is the length of the first vector.
    pub fn fixed<I, S>(vectors: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let pairs: Vec<(String, Vec<f32>)> =
            vectors.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let inner = Self::new();
        let dim = pairs
            .first()
            .map_or(inner.inner.embedding_dim(), |(_, v)| v.len());
        Self {
            behavior: MockBehavior::Fixed {
                vectors: pairs.into_iter().collect(),
                dim,
            },
            ..inner
        }
    }

    /// Sleeps for `delay` on every call before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `encode` calls so far (shared between clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        match &self.behavior {
            MockBehavior::Stub => self.inner.embed(text),
            MockBehavior::Fail(reason) => Err(EmbeddingError::InferenceFailed {
                reason: reason.clone(),
            }),
            MockBehavior::Fixed { vectors, .. } => {
                vectors
                    .get(text)
                    .cloned()
                    .ok_or_else(|| EmbeddingError::InferenceFailed {
                        reason: format!("no fixed vector for {text:?}"),
                    })
            }
        }
    }

    fn embedding_dim(&self) -> usize {
        match &self.behavior {
            MockBehavior::Fixed { dim, .. } => *dim,
            _ => self.inner.embedding_dim(),
        }
    }

    fn is_stub(&self) -> bool {
        true
    }
}
