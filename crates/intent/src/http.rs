//! Client for a remote intent service.
//!
//! Sends `POST {url}` with `{"query": "..."}` and expects a JSON body shaped
//! like `{"targets": [...], "colors": [...], "pairs": [...]}`.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::IntentError;
use crate::service::IntentService;

/// Default request timeout for a single interpretation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one intent-service endpoint.
pub struct HttpIntentService {
    client: reqwest::Client,
    url: String,
}

impl HttpIntentService {
    /// Create a client with its own connection pool and `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, IntentError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IntentService for HttpIntentService {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn suggest(&self, query: &str) -> Result<serde_json::Value, IntentError> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(IntentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| IntentError::Malformed(e.to_string()))
    }
}
