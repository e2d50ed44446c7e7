//! In-process intent extraction backed by the Gemini `generateContent` API.
//!
//! The model is asked to answer with a single JSON object. Its reply text is
//! scanned for the first `{ ... }` block, which is handed back unnormalized.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::IntentError;
use crate::service::IntentService;

/// Base URL of the Gemini model endpoints.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model used for intent extraction.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Greedy match from the first `{` to the last `}`.
static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));

const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_SEXUAL",
    "HARM_CATEGORY_DANGEROUS",
];

pub struct GeminiIntentService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiIntentService {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IntentError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (used against local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Build the extraction prompt for `query`.
pub fn build_prompt(query: &str) -> String {
    format!(
        "You extract computer-vision search intents from natural language.\n\
         Respond ONLY with a JSON object shaped like \
         {{\"targets\": [\"object\"], \"colors\": [\"color\"], \"pairs\": [{{\"object\": \"car\", \"color\": \"red\"}}]}}.\n\
         Use lowercase singular nouns for objects (e.g. \"person\", \"car\", \"laptop\") \
         and plain color names (e.g. \"red\", \"blue\"). When a color describes a specific \
         object, list it under \"pairs\". Omit unrelated words.\n\
         User request: \"{query}\"\n\
         JSON response:"
    )
}

/// Pull the model's reply text out of a `generateContent` response.
///
/// Uses `candidates[0].content.parts[0].text`, then `candidates[0].outputText`.
pub fn candidate_text(response: &Value) -> Option<&str> {
    let candidate = response.get("candidates")?.get(0)?;
    candidate
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            candidate
                .get("outputText")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
        })
}

/// Find the JSON object embedded in free-form model output.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(text).map(|m| m.as_str())
}

#[async_trait]
impl IntentService for GeminiIntentService {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn suggest(&self, query: &str) -> Result<Value, IntentError> {
        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_NONE" }))
            .collect();

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(query) }],
            }],
            "safetySettings": safety_settings,
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
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

        let payload: Value = response.json().await?;
        let text = candidate_text(&payload)
            .ok_or_else(|| IntentError::Malformed("no candidate text in reply".into()))?;
        let object = extract_json_object(text)
            .ok_or_else(|| IntentError::Malformed("no JSON object in reply".into()))?;

        serde_json::from_str(object).map_err(|e| IntentError::Malformed(e.to_string()))
    }
}
