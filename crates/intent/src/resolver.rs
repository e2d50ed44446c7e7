//! Query interpretation with keyword fallback.
//!
//! [`IntentResolver::interpret`] never fails. Outcomes:
//!
//! | Provider outcome                   | Result                 | Notice |
//! |------------------------------------|------------------------|--------|
//! | usable targets / colors / pairs    | normalized suggestion  | no     |
//! | well-formed but empty              | keyword fallback       | no     |
//! | transport, status, or parse error  | keyword fallback       | yes    |
//! | no provider configured             | keyword fallback       | no     |
//!
//! Each call issues at most one provider request. Concurrent calls are
//! independent; nothing is queued or merged.

use std::sync::Arc;

use serde::Serialize;
use sherlock_core::intent::{normalize_suggestion, QueryIntent};
use sherlock_core::summary::FALLBACK_NOTICE;

use crate::service::IntentService;

/// Where an interpretation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    Service,
    Keywords,
}

/// Result of interpreting one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub intent: QueryIntent,
    pub source: IntentSource,
    /// Set only when the provider failed and the fallback was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Interpretation {
    fn from_keywords(text: &str, notice: Option<String>) -> Self {
        Self {
            intent: QueryIntent::from_text(text),
            source: IntentSource::Keywords,
            notice,
        }
    }
}

/// Interprets raw query text through an optional [`IntentService`].
#[derive(Clone)]
pub struct IntentResolver {
    service: Option<Arc<dyn IntentService>>,
}

impl IntentResolver {
    pub fn new(service: Arc<dyn IntentService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// A resolver that always uses keyword extraction.
    pub fn keywords_only() -> Self {
        Self { service: None }
    }

    /// Name of the configured provider, if any.
    pub fn provider(&self) -> Option<&'static str> {
        self.service.as_ref().map(|s| s.name())
    }

    /// Interpret `text` into a [`QueryIntent`].
    pub async fn interpret(&self, text: &str) -> Interpretation {
        if text.trim().is_empty() {
            return Interpretation::from_keywords(text, None);
        }

        let Some(service) = &self.service else {
            return Interpretation::from_keywords(text, None);
        };

        let value = match service.suggest(text).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(provider = service.name(), error = %e, "Intent provider failed, using keywords");
                return Interpretation::from_keywords(text, Some(FALLBACK_NOTICE.to_string()));
            }
        };

        match normalize_suggestion(&value) {
            Ok(intent) if !intent.is_empty() => {
                tracing::debug!(
                    provider = service.name(),
                    targets = intent.targets.len(),
                    colors = intent.colors.len(),
                    pairs = intent.pairs.len(),
                    "Intent resolved",
                );
                Interpretation {
                    intent,
                    source: IntentSource::Service,
                    notice: None,
                }
            }
            Ok(_) => {
                tracing::debug!(provider = service.name(), "Empty intent suggestion, using keywords");
                Interpretation::from_keywords(text, None)
            }
            Err(e) => {
                tracing::warn!(provider = service.name(), error = %e, "Unreadable intent suggestion, using keywords");
                Interpretation::from_keywords(text, Some(FALLBACK_NOTICE.to_string()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
