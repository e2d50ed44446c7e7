use std::sync::Arc;
use std::time::Duration;

use sherlock_core::matching::DEFAULT_CONFIDENCE_THRESHOLD;
use sherlock_intent::gemini::{GeminiIntentService, DEFAULT_GEMINI_MODEL};
use sherlock_intent::http::HttpIntentService;
use sherlock_intent::{IntentError, IntentResolver};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted corpus upload size in bytes (default: 256 MiB).
    pub max_corpus_bytes: usize,
    /// Minimum detection confidence used for matching (default: `0.6`).
    pub confidence_threshold: f64,
    /// Intent provider settings.
    pub intent: IntentConfig,
}

/// Which intent provider to talk to, if any.
#[derive(Debug, Clone)]
pub struct IntentConfig {
    /// Remote intent service endpoint. Takes precedence over Gemini.
    pub service_url: Option<String>,
    /// Per-request timeout for the provider in seconds (default: `10`).
    pub timeout_secs: u64,
    /// Gemini API key for in-process extraction.
    pub gemini_api_key: Option<String>,
    /// Gemini model name (default: `gemini-pro`).
    pub gemini_model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_CORPUS_BYTES`     | `268435456`                |
    /// | `MIN_CONFIDENCE`       | `0.6`                      |
    /// | `INTENT_SERVICE_URL`   | unset                      |
    /// | `INTENT_TIMEOUT_SECS`  | `10`                       |
    /// | `GEMINI_API_KEY`       | unset                      |
    /// | `GEMINI_MODEL`         | `gemini-pro`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_corpus_bytes: usize = std::env::var("MAX_CORPUS_BYTES")
            .unwrap_or_else(|_| (256 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_CORPUS_BYTES must be a valid usize");

        let confidence_threshold: f64 = std::env::var("MIN_CONFIDENCE")
            .map(|v| v.parse().expect("MIN_CONFIDENCE must be a number"))
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);
        assert!(
            (0.0..=1.0).contains(&confidence_threshold),
            "MIN_CONFIDENCE must be within [0, 1]"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_corpus_bytes,
            confidence_threshold,
            intent: IntentConfig::from_env(),
        }
    }
}

impl IntentConfig {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_secs: u64 = std::env::var("INTENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("INTENT_TIMEOUT_SECS must be a valid u64");

        Self {
            service_url: non_empty("INTENT_SERVICE_URL"),
            timeout_secs,
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
        }
    }

    /// Config with no provider at all (keyword extraction only).
    pub fn keywords_only() -> Self {
        Self {
            service_url: None,
            timeout_secs: 10,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolver used for chat queries.
    ///
    /// Prefers the remote service, then in-process Gemini, then keywords.
    pub fn query_resolver(&self) -> Result<IntentResolver, IntentError> {
        if let Some(url) = &self.service_url {
            let service = HttpIntentService::new(url.clone(), self.timeout())?;
            return Ok(IntentResolver::new(Arc::new(service)));
        }
        self.hosted_resolver()
    }

    /// Resolver behind the hosted `/intent` endpoint.
    ///
    /// Never uses the remote service, so the server cannot call itself.
    pub fn hosted_resolver(&self) -> Result<IntentResolver, IntentError> {
        match &self.gemini_api_key {
            Some(key) => {
                let service =
                    GeminiIntentService::new(key.clone(), self.gemini_model.clone(), self.timeout())?;
                Ok(IntentResolver::new(Arc::new(service)))
            }
            None => Ok(IntentResolver::keywords_only()),
        }
    }
}
