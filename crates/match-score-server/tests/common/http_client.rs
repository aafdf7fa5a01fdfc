//! HTTP client helpers for tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use match_score_server::gateway::STATUS_HEADER;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status, `x-match-score-status` header and JSON body of one response.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub status_header: String,
    pub body: serde_json::Value,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Scores a pair, failing on any non-200 response.
    pub async fn analyze(&self, resume: &str, jd: &str) -> Result<AnalyzeResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/analyze"))
            .json(&serde_json::json!({"resume": resume, "jd": jd}))
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    /// Posts an arbitrary JSON body to `/analyze`.
    pub async fn analyze_raw(&self, body: &serde_json::Value) -> Result<RawResponse, TestClientError> {
        let resp = self.client.post(self.url("/analyze")).json(body).send().await?;
        Self::into_raw(resp).await
    }

    /// Posts a raw string to `/analyze` with the given content type.
    pub async fn analyze_text(
        &self,
        body: impl Into<String>,
        content_type: &str,
    ) -> Result<RawResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/analyze"))
            .header("Content-Type", content_type)
            .body(body.into())
            .send()
            .await?;
        Self::into_raw(resp).await
    }

    async fn into_raw(resp: reqwest::Response) -> Result<RawResponse, TestClientError> {
        let status = resp.status().as_u16();
        let status_header = resp
            .headers()
            .get(STATUS_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Ok(RawResponse {
            status,
            status_header,
            body,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AnalyzeResponse {
    pub match_score: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub encoder: String,
    pub encoder_mode: String,
    pub embedding_dim: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),
}
