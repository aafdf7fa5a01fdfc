use std::sync::Arc;
use std::time::Duration;

use matchscore::constants::{DEFAULT_MAX_BODY_BYTES, DEFAULT_REQUEST_TIMEOUT_MS};
use matchscore::{Config, MatchScorer, TextEncoder};

pub struct HandlerState<E: TextEncoder + 'static> {
    pub scorer: Arc<MatchScorer<E>>,

    pub request_timeout: Duration,

    pub max_body_bytes: usize,
}

// Manual impl: `E` itself need not be `Clone`.
impl<E: TextEncoder + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            request_timeout: self.request_timeout,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl<E: TextEncoder + 'static> HandlerState<E> {
    pub fn new(scorer: Arc<MatchScorer<E>>) -> Self {
        Self {
            scorer,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn from_config(scorer: Arc<MatchScorer<E>>, config: &Config) -> Self {
        Self {
            scorer,
            request_timeout: config.request_timeout(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
